use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret text (a password being typed, a bearer token) that is wiped from
/// memory when dropped and never printed by `Debug`/`Display`.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureCredential {
    data: String,
}

impl SecureCredential {
    pub fn new(data: String) -> Self {
        Self { data }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Borrow the secret.
    ///
    /// Avoid holding on to the returned slice; it is zeroed on drop.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Clone for SecureCredential {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl From<String> for SecureCredential {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&str> for SecureCredential {
    fn from(data: &str) -> Self {
        Self::new(data.to_string())
    }
}

impl fmt::Debug for SecureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureCredential")
            .field("len", &self.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[SecureCredential: {} bytes]", self.len())
    }
}

impl PartialEq for SecureCredential {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.data.as_bytes() == other.data.as_bytes()
    }
}

impl Eq for SecureCredential {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_redact() {
        let credential = SecureCredential::from("hunter22");

        let debug = format!("{credential:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter22"));
        assert_eq!(
            format!("{credential}"),
            "[SecureCredential: 8 bytes]"
        );
    }

    #[test]
    fn len_counts_bytes() {
        assert_eq!(SecureCredential::from("ñandú").len(), 7);
    }

    #[test]
    fn default_is_empty() {
        assert!(SecureCredential::empty().is_empty());
        assert_eq!(SecureCredential::empty(), SecureCredential::from(""));
    }
}
