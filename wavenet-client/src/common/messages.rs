use crate::common::task::Task;
use crate::domains::profile::messages::{ProfileEvent, ProfileMessage};

/// Result of a domain update: work to run next plus events to apply now
#[derive(Debug)]
pub struct DomainUpdateResult {
    /// The task to execute (may produce another message)
    pub task: Task<ProfileMessage>,
    /// Events for the host: completion notices, session refresh requests
    pub events: Vec<ProfileEvent>,
}

impl DomainUpdateResult {
    /// Nothing to run, nothing to report
    pub fn none() -> Self {
        Self {
            task: Task::none(),
            events: Vec::new(),
        }
    }

    /// Create a result with just a task
    pub fn task(task: Task<ProfileMessage>) -> Self {
        Self {
            task,
            events: Vec::new(),
        }
    }

    /// Create a result with just events
    pub fn events(events: Vec<ProfileEvent>) -> Self {
        Self {
            task: Task::none(),
            events,
        }
    }

    /// Add an event to this result
    pub fn add_event(mut self, event: ProfileEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Check if this update schedules no work and reports nothing
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.events.is_empty()
    }
}
