use std::fmt;

use super::security::SecureCredential;

/// Opaque token proving the acting user's identity to the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(SecureCredential);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecureCredential::new(token.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0.as_str())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}
