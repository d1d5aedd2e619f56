//! WaveNet profile client
//!
//! Headless implementation of the "edit profile" form: draft state,
//! field validation, picture intake and the submission state machine, plus
//! the HTTP adapters for the WaveNet backend and the identity provider.
//!
//! Notes
//! - Rendering is left to the host UI; it sends
//!   [`domains::profile::ProfileMessage`]s and reads
//!   [`domains::profile::ProfileFormState`].
//! - Collaborators are injected through [`infra::services::ProfileServices`];
//!   [`infra::testing`] provides in-memory stand-ins.

pub mod app;
pub mod common;
pub mod domains;
pub mod infra;

pub mod prelude {
    pub use crate::domains::auth::{BearerToken, SecureCredential};
    pub use crate::domains::profile::{
        CompletionCallback, CompletionOutcome, Field, ProfileEditForm,
        ProfileEvent, ProfileFormState, ProfileMessage, ProfilePicture,
    };
    pub use crate::infra::config::{Config, FormConfig};
    pub use crate::infra::services::ProfileServices;
    pub use wavenet_model::{ImageFile, UserSnapshot};
}
