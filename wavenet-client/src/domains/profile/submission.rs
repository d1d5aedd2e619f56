//! Profile submission: request composition and the update/password sequence

use log::{debug, warn};
use thiserror::Error;
use wavenet_model::{ProfileUpdateRequest, UserSnapshot};

use super::state::ProfileFormState;
use crate::domains::auth::SecureCredential;
use crate::infra::services::{ProfileServices, ServiceError};

/// Shown for failures that carry no server message
pub const GENERIC_FAILURE_MESSAGE: &str =
    "We couldn't update your profile. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired. Please sign in again.";

/// What happened to a requested password change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordChange {
    NotRequested,
    Updated,
    /// Profile was saved but the password was not changed
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSuccess {
    pub password: PasswordChange,
    /// Updated record when the backend echoes it back
    pub user: Option<UserSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitErrorKind {
    /// The backend answered with a non-success status
    Structured,
    /// No structured answer arrived
    Transport,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Profile update rejected: {message}")]
    Rejected { message: String },

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Profile update failed: {0}")]
    Transport(String),
}

impl SubmitError {
    pub fn kind(&self) -> SubmitErrorKind {
        match self {
            SubmitError::Rejected { .. } => SubmitErrorKind::Structured,
            SubmitError::NotAuthenticated | SubmitError::Transport(_) => {
                SubmitErrorKind::Transport
            }
        }
    }

    /// Text for the completion callback
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Rejected { message } => message.clone(),
            SubmitError::NotAuthenticated => {
                SESSION_EXPIRED_MESSAGE.to_string()
            }
            SubmitError::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<ServiceError> for SubmitError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotAuthenticated
            | ServiceError::CredentialExpired => SubmitError::NotAuthenticated,
            ServiceError::Rejected(message) => SubmitError::Rejected { message },
            other => SubmitError::Transport(other.to_string()),
        }
    }
}

pub type SubmissionResult = Result<SubmitSuccess, SubmitError>;

/// Compose the outbound request from the draft.
///
/// The username is sent only when non-empty, visibility always, and the
/// picture only when the user picked a new one.
pub fn build_request(state: &ProfileFormState) -> ProfileUpdateRequest {
    let draft = &state.draft;
    ProfileUpdateRequest {
        username: (!draft.username.is_empty())
            .then(|| draft.username.clone()),
        public_profile: draft.public_profile,
        file: draft.profile_picture.pending_upload().cloned(),
    }
}

/// Send the profile edit, then the password change if one was entered.
///
/// The password call is only made after the profile call succeeded.
pub async fn run(
    services: ProfileServices,
    request: ProfileUpdateRequest,
    password: Option<SecureCredential>,
) -> SubmissionResult {
    let token = services.session.bearer_token().await?;
    let response = services.profile.update_profile(&token, request).await?;

    if !response.is_success() {
        return Err(SubmitError::Rejected {
            message: response.message.unwrap_or_default(),
        });
    }

    let password = match password {
        None => PasswordChange::NotRequested,
        Some(password) => {
            debug!("[ProfileForm] Profile saved, updating password");
            match services.password.update_password(password).await {
                Ok(()) => PasswordChange::Updated,
                Err(err) => {
                    warn!("[ProfileForm] Password update failed: {}", err);
                    PasswordChange::Failed(err.to_string())
                }
            }
        }
    };

    Ok(SubmitSuccess {
        password,
        user: response.user,
    })
}
