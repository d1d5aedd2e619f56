//! Profile form messages
//!
//! Inputs from the UI layer and completions of async work both arrive here.

use std::fmt;

use wavenet_model::ImageFile;

use super::submission::SubmissionResult;
use crate::domains::auth::SecureCredential;

#[derive(Debug, Clone)]
pub enum ProfileMessage {
    // Field edits
    /// Username input changed
    UsernameChanged(String),
    /// New password input changed
    PasswordChanged(SecureCredential),
    /// Visibility button pressed
    ToggleVisibility,

    // Picture
    /// A file was picked in the image chooser
    PictureSelected(ImageFile),
    /// The data-URL preview for a selection finished rendering
    PreviewRendered {
        generation: u64,
        result: Result<String, String>,
    },
    /// "Delete Photo" pressed
    RemovePicture,

    // Actions
    /// Save pressed
    Submit,
    /// Result of the update (and password) calls
    SubmissionFinished(SubmissionResult),
    /// Cancel pressed
    Cancel,
}

impl ProfileMessage {
    /// Get a static name for logging/debugging
    pub fn name(&self) -> &'static str {
        match self {
            Self::UsernameChanged(_) => "Profile::UsernameChanged",
            Self::PasswordChanged(_) => "Profile::PasswordChanged",
            Self::ToggleVisibility => "Profile::ToggleVisibility",
            Self::PictureSelected(_) => "Profile::PictureSelected",
            Self::PreviewRendered { .. } => "Profile::PreviewRendered",
            Self::RemovePicture => "Profile::RemovePicture",
            Self::Submit => "Profile::Submit",
            Self::SubmissionFinished(_) => "Profile::SubmissionFinished",
            Self::Cancel => "Profile::Cancel",
        }
    }
}

/// Outcome reported through the completion callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionOutcome {
    Success,
    Error,
    Cancel,
}

impl CompletionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionOutcome::Success => "success",
            CompletionOutcome::Error => "error",
            CompletionOutcome::Cancel => "cancel",
        }
    }
}

impl fmt::Display for CompletionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effects for the host to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    /// Report upward and let the owner dismiss the form
    Completed {
        outcome: CompletionOutcome,
        message: String,
    },
    /// The session should re-fetch its user snapshot
    SessionRefreshRequested,
}

impl ProfileEvent {
    pub fn completed(
        outcome: CompletionOutcome,
        message: impl Into<String>,
    ) -> Self {
        ProfileEvent::Completed {
            outcome,
            message: message.into(),
        }
    }
}
