//! Credentials held on behalf of the signed-in user.

pub mod security;
pub mod types;

pub use security::SecureCredential;
pub use types::BearerToken;
