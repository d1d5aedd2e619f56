//! Profile editing domain
//!
//! One open form per [`ProfileEditForm`]:
//! - Draft: username, picture, visibility, plus an independent new password
//! - Validation: per-field messages and the submit gate
//! - Picture intake: size ceiling, data-URL preview, "remove photo"
//! - Submission: profile update, then password update, then completion
//!
//! The UI layer sends [`ProfileMessage`]s and reads [`ProfileFormState`].
//! Results are reported through the completion callback handed to
//! [`ProfileEditForm::open`].

pub mod intake;
pub mod messages;
pub mod state;
pub mod submission;
pub mod update;
pub mod validation;

pub use messages::{CompletionOutcome, ProfileEvent, ProfileMessage};
pub use state::{
    DraftState, FieldErrors, PreviewImage, ProfileFormState, ProfilePicture,
    SubmissionState,
};
pub use validation::{EmptyValuePolicy, Field};

use std::fmt;
use std::sync::Arc;

use log::debug;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::common::DomainUpdateResult;
use crate::infra::config::FormConfig;
use crate::infra::services::ProfileServices;

/// Caller-supplied sink for the form's results; it owns dismissing the form
pub type CompletionCallback =
    Arc<dyn Fn(CompletionOutcome, &str) + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("No signed-in user to edit")]
    NotAuthenticated,
}

/// An open profile edit form and the collaborators it reports to
pub struct ProfileEditForm {
    pub(crate) state: ProfileFormState,
    pub(crate) config: FormConfig,
    pub(crate) services: ProfileServices,
    on_complete: CompletionCallback,
    lifetime: CancellationToken,
}

impl fmt::Debug for ProfileEditForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileEditForm")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("services", &self.services)
            .field("closed", &self.lifetime.is_cancelled())
            .finish()
    }
}

impl ProfileEditForm {
    /// Open a form over the session's current user
    pub fn open(
        services: ProfileServices,
        config: FormConfig,
        on_complete: CompletionCallback,
    ) -> Result<Self, FormError> {
        let snapshot = services
            .session
            .current_user()
            .ok_or(FormError::NotAuthenticated)?;

        debug!("[ProfileForm] Opened for {}", snapshot.username);

        Ok(Self {
            state: ProfileFormState::new(snapshot),
            config,
            services,
            on_complete,
            lifetime: CancellationToken::new(),
        })
    }

    pub fn state(&self) -> &ProfileFormState {
        &self.state
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Token cancelled when the form closes.
    ///
    /// Hosts may cancel it too; the form then behaves as if [`Self::close`]
    /// had been called.
    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    /// Whether the submit action should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_closed()
            && self.state.can_submit()
            && !self.state.is_submitting()
    }

    /// Apply one message without running the task it schedules
    pub fn update(&mut self, message: ProfileMessage) -> DomainUpdateResult {
        if self.lifetime.is_cancelled() && !self.state.closed {
            debug!("[ProfileForm] Lifetime cancelled by the host");
            self.close();
        }
        update::handle_message(self, message)
    }

    /// Carry out an event produced by [`Self::update`]
    pub fn apply_event(&self, event: ProfileEvent) {
        match event {
            ProfileEvent::Completed { outcome, message } => {
                debug!("[ProfileForm] Completed: {} {:?}", outcome, message);
                (self.on_complete)(outcome, &message);
            }
            ProfileEvent::SessionRefreshRequested => {
                self.services.session.request_refresh();
            }
        }
    }

    /// Apply `message` and drive any follow-up work to completion.
    ///
    /// Work still pending when the form closes is abandoned and its result
    /// never reaches the state or the callback.
    pub async fn dispatch(&mut self, message: ProfileMessage) {
        let mut next = Some(message);

        while let Some(message) = next.take() {
            let DomainUpdateResult { task, events } = self.update(message);
            for event in events {
                self.apply_event(event);
            }

            let Some(future) = task.into_future() else {
                break;
            };

            let lifetime = self.lifetime.clone();
            next = tokio::select! {
                biased;
                _ = lifetime.cancelled() => {
                    debug!("[ProfileForm] Form closed with work in flight");
                    None
                }
                message = future => Some(message),
            };
        }

        if self.lifetime.is_cancelled() {
            self.close();
        }
    }

    /// Close the form without reporting anything.
    ///
    /// Work in flight is abandoned, so the form leaves `Submitting`.
    pub fn close(&mut self) {
        if !self.state.closed {
            debug!("[ProfileForm] Closing");
        }
        self.state.closed = true;
        self.state.submission = SubmissionState::Idle;
        self.lifetime.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed || self.lifetime.is_cancelled()
    }
}

impl Drop for ProfileEditForm {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
