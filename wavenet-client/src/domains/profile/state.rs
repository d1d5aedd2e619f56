//! Profile form state
//!
//! Everything here is scoped to one open form: created from the user
//! snapshot when the form opens, discarded when it closes.

use std::collections::BTreeMap;

use wavenet_model::{ImageFile, UserSnapshot};

use super::validation::Field;
use crate::domains::auth::SecureCredential;

/// Canonical value of the picture field in the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePicture {
    /// URL or path from the snapshot, untouched
    Current(String),
    /// "Remove photo": fall back to the default image
    Default,
    /// A newly picked image waiting to be uploaded
    Selected(ImageFile),
}

impl ProfilePicture {
    /// The image to upload, if the user picked a new one
    pub fn pending_upload(&self) -> Option<&ImageFile> {
        match self {
            ProfilePicture::Selected(file) => Some(file),
            ProfilePicture::Current(_) | ProfilePicture::Default => None,
        }
    }
}

/// Pending, unsaved edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    pub username: String,
    pub profile_picture: ProfilePicture,
    pub public_profile: bool,
}

impl DraftState {
    pub fn from_snapshot(snapshot: &UserSnapshot) -> Self {
        Self {
            username: snapshot.username.clone(),
            profile_picture: ProfilePicture::Current(
                snapshot.profile_picture.clone(),
            ),
            public_profile: snapshot.public_profile,
        }
    }
}

/// Per-field error messages; an empty message means the field is valid.
///
/// Entries only exist for fields that have been edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn set(&mut self, field: Field, error: String) {
        self.entries.insert(field, error);
    }

    /// Message for `field`, empty when valid or never edited
    pub fn get(&self, field: Field) -> &str {
        self.entries.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Invalid-state indicator for styling the input
    pub fn is_invalid(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// True when every recorded entry is empty, including when none exist
    pub fn all_clear(&self) -> bool {
        self.entries.values().all(String::is_empty)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Locally rendered image shown before anything is uploaded.
///
/// Either a URL/path or a `data:` URL for a freshly picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage(String);

impl PreviewImage {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }
}

/// All state of an open profile form
#[derive(Debug, Clone)]
pub struct ProfileFormState {
    /// Snapshot read when the form opened
    pub snapshot: UserSnapshot,
    pub draft: DraftState,
    /// New password; independent of the draft
    pub password: SecureCredential,
    pub errors: FieldErrors,
    pub submission: SubmissionState,
    pub preview: PreviewImage,
    /// User-facing notice that does not block submission
    pub notice: Option<String>,
    /// Bumped whenever the preview is superseded
    pub preview_generation: u64,
    /// Set once the form is cancelled or closed
    pub closed: bool,
}

impl ProfileFormState {
    pub fn new(snapshot: UserSnapshot) -> Self {
        Self {
            draft: DraftState::from_snapshot(&snapshot),
            preview: PreviewImage::new(snapshot.profile_picture.clone()),
            snapshot,
            password: SecureCredential::empty(),
            errors: FieldErrors::default(),
            submission: SubmissionState::Idle,
            notice: None,
            preview_generation: 0,
            closed: false,
        }
    }

    /// Form-enable gate: submission is allowed when no field reports an error
    pub fn can_submit(&self) -> bool {
        self.errors.all_clear()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    /// Label of the visibility toggle
    pub fn visibility_label(&self) -> &'static str {
        if self.draft.public_profile {
            "Public"
        } else {
            "Private"
        }
    }
}
