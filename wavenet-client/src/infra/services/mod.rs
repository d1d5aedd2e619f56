//! Collaborator contracts the profile form depends on
//!
//! The form never reaches for process-wide session or auth state; every
//! collaborator is handed to it through [`ProfileServices`].

use std::sync::Arc;

use thiserror::Error;

pub mod password;
pub mod profile;
pub mod session;

pub use password::{
    DisabledPasswordService, IdentityToolkitPasswordService, PasswordService,
};
pub use profile::{ProfileApiAdapter, ProfileApiService};
pub use session::{ApiSessionService, SessionService};

use crate::infra::api_client::ApiError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Credentials expired - please sign in again")]
    CredentialExpired,

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::CredentialExpired,
            ApiError::Request(source) => {
                ServiceError::Transport(source.to_string())
            }
            ApiError::InvalidUpload(reason) => ServiceError::Transport(reason),
            other => ServiceError::InvalidResponse(other.to_string()),
        }
    }
}

/// The collaborators one profile form talks to
#[derive(Clone, Debug)]
pub struct ProfileServices {
    pub session: Arc<dyn SessionService>,
    pub profile: Arc<dyn ProfileApiService>,
    pub password: Arc<dyn PasswordService>,
}

impl ProfileServices {
    pub fn new(
        session: Arc<dyn SessionService>,
        profile: Arc<dyn ProfileApiService>,
        password: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            session,
            profile,
            password,
        }
    }
}
