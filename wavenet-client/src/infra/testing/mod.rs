//! In-memory collaborators for tests, demos and UI previews.

pub mod stubs;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domains::profile::{CompletionCallback, CompletionOutcome};

/// Records every completion callback invocation
#[derive(Debug, Clone, Default)]
pub struct CompletionRecorder {
    calls: Arc<Mutex<Vec<(CompletionOutcome, String)>>>,
}

impl CompletionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> CompletionCallback {
        let calls = self.calls.clone();
        Arc::new(move |outcome, message: &str| {
            calls.lock().push((outcome, message.to_string()));
        })
    }

    pub fn calls(&self) -> Vec<(CompletionOutcome, String)> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<(CompletionOutcome, String)> {
        self.calls.lock().last().cloned()
    }
}
