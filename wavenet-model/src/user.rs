#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Last known server-side record of the signed-in user.
///
/// Read once when the profile form opens; the form never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserSnapshot {
    pub username: String,
    /// URL or server path of the current picture
    pub profile_picture: String,
    pub public_profile: bool,
}

impl UserSnapshot {
    pub fn new(
        username: impl Into<String>,
        profile_picture: impl Into<String>,
        public_profile: bool,
    ) -> Self {
        Self {
            username: username.into(),
            profile_picture: profile_picture.into(),
            public_profile,
        }
    }
}
