use crate::{files::ImageFile, user::UserSnapshot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outbound profile edit, sent as a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdateRequest {
    /// Omitted from the body when `None`
    pub username: Option<String>,
    pub public_profile: bool,
    /// Only present when the user picked a new image
    pub file: Option<ImageFile>,
}

impl ProfileUpdateRequest {
    pub const USERNAME_FIELD: &'static str = "username";
    pub const PUBLIC_PROFILE_FIELD: &'static str = "public_profile";
    pub const FILE_FIELD: &'static str = "file";

    /// Wire form of the visibility flag
    pub fn public_profile_value(&self) -> &'static str {
        if self.public_profile { "true" } else { "false" }
    }
}

/// Status value the backend uses for a successful edit.
pub const STATUS_SUCCESS: &str = "success";

/// Structured reply to a profile edit.
///
/// Failures use the same schema as success and are told apart by `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfileUpdateResponse {
    pub status: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub user: Option<UserSnapshot>,
}

impl ProfileUpdateResponse {
    pub fn success() -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: None,
            user: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            user: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Reply to `GET /auth/user`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentUserResponse {
    pub user: UserSnapshot,
}
