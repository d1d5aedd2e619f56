//! Core data model definitions shared across WaveNet crates.
#![allow(missing_docs)]

pub mod files;
pub mod profile;
pub mod routes;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use files::ImageFile;
pub use profile::{
    CurrentUserResponse, ProfileUpdateRequest, ProfileUpdateResponse,
};
pub use user::UserSnapshot;

/// Image path the backend serves when a user has no picture of their own.
pub const DEFAULT_PROFILE_PICTURE: &str = "/no_pfp.webp";

/// Largest profile picture the client will accept for upload (10 MiB).
pub const MAX_PROFILE_PICTURE_BYTES: u64 = 10 * 1024 * 1024;
