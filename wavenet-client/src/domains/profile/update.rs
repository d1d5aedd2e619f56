//! Profile form update handlers
//!
//! Handles all ProfileMessage variants and updates state accordingly.

use log::{debug, error, info, warn};
use wavenet_model::ImageFile;

use super::ProfileEditForm;
use super::intake::{self, IntakeError};
use super::messages::{CompletionOutcome, ProfileEvent, ProfileMessage};
use super::state::{PreviewImage, ProfilePicture, SubmissionState};
use super::submission::{
    self, PasswordChange, SubmissionResult, SubmitErrorKind, SubmitSuccess,
};
use super::validation::{Field, validate_field};
use crate::common::{DomainUpdateResult, Task};
use crate::domains::auth::SecureCredential;

/// Main message handler for the profile form
pub fn handle_message(
    form: &mut ProfileEditForm,
    message: ProfileMessage,
) -> DomainUpdateResult {
    if form.state.closed {
        debug!(
            "[ProfileForm] Dropping {} after the form closed",
            message.name()
        );
        return DomainUpdateResult::none();
    }

    match message {
        ProfileMessage::UsernameChanged(value) => {
            handle_username_changed(form, value)
        }
        ProfileMessage::PasswordChanged(value) => {
            handle_password_changed(form, value)
        }
        ProfileMessage::ToggleVisibility => handle_toggle_visibility(form),
        ProfileMessage::PictureSelected(file) => {
            handle_picture_selected(form, file)
        }
        ProfileMessage::PreviewRendered { generation, result } => {
            handle_preview_rendered(form, generation, result)
        }
        ProfileMessage::RemovePicture => handle_remove_picture(form),
        ProfileMessage::Submit => handle_submit(form),
        ProfileMessage::SubmissionFinished(result) => {
            handle_submission_finished(form, result)
        }
        ProfileMessage::Cancel => handle_cancel(form),
    }
}

fn handle_username_changed(
    form: &mut ProfileEditForm,
    value: String,
) -> DomainUpdateResult {
    let policy = form.config.empty_value_policy();
    let error = validate_field(Field::Username, &value, policy);

    form.state.draft.username = value;
    form.state.errors.set(Field::Username, error);
    DomainUpdateResult::none()
}

fn handle_password_changed(
    form: &mut ProfileEditForm,
    value: SecureCredential,
) -> DomainUpdateResult {
    let policy = form.config.empty_value_policy();
    let error = validate_field(Field::Password, value.as_str(), policy);

    form.state.password = value;
    form.state.errors.set(Field::Password, error);
    DomainUpdateResult::none()
}

fn handle_toggle_visibility(form: &mut ProfileEditForm) -> DomainUpdateResult {
    let draft = &mut form.state.draft;
    draft.public_profile = !draft.public_profile;
    DomainUpdateResult::none()
}

fn handle_picture_selected(
    form: &mut ProfileEditForm,
    file: ImageFile,
) -> DomainUpdateResult {
    let limit = form.config.max_upload_bytes;
    if let Err(err) = intake::check_size(file.len(), limit) {
        warn!(
            "[ProfileForm] Ignoring {} ({} bytes): {}",
            file.file_name,
            file.len(),
            err
        );
        form.state.notice = Some(err.to_string());
        return DomainUpdateResult::none();
    }

    let state = &mut form.state;
    state.notice = None;
    state.preview_generation += 1;
    state.draft.profile_picture = ProfilePicture::Selected(file.clone());

    let generation = state.preview_generation;
    DomainUpdateResult::task(Task::perform(
        intake::render_preview(file),
        move |result: Result<String, IntakeError>| {
            ProfileMessage::PreviewRendered {
                generation,
                result: result.map_err(|err| err.to_string()),
            }
        },
    ))
}

fn handle_preview_rendered(
    form: &mut ProfileEditForm,
    generation: u64,
    result: Result<String, String>,
) -> DomainUpdateResult {
    if generation != form.state.preview_generation {
        debug!(
            "[ProfileForm] Discarding stale preview {} (current {})",
            generation, form.state.preview_generation
        );
        return DomainUpdateResult::none();
    }

    match result {
        Ok(data_url) => form.state.preview = PreviewImage::new(data_url),
        Err(err) => warn!("[ProfileForm] Preview failed: {}", err),
    }
    DomainUpdateResult::none()
}

fn handle_remove_picture(form: &mut ProfileEditForm) -> DomainUpdateResult {
    let default_picture = form.config.default_profile_picture.clone();
    let state = &mut form.state;

    // supersedes any preview still rendering
    state.preview_generation += 1;
    state.notice = None;
    state.draft.profile_picture = ProfilePicture::Default;
    state.preview = PreviewImage::new(default_picture);
    DomainUpdateResult::none()
}

fn handle_submit(form: &mut ProfileEditForm) -> DomainUpdateResult {
    if form.state.is_submitting() {
        debug!("[ProfileForm] Submit ignored, already submitting");
        return DomainUpdateResult::none();
    }
    if !form.state.can_submit() {
        debug!("[ProfileForm] Submit ignored, form has field errors");
        return DomainUpdateResult::none();
    }

    let request = submission::build_request(&form.state);
    let password = (!form.state.password.is_empty())
        .then(|| form.state.password.clone());

    info!(
        "[ProfileForm] Submitting profile (username: {}, upload: {})",
        request.username.is_some(),
        request.file.is_some()
    );
    form.state.submission = SubmissionState::Submitting;

    DomainUpdateResult::task(Task::perform(
        submission::run(form.services.clone(), request, password),
        ProfileMessage::SubmissionFinished,
    ))
}

fn handle_submission_finished(
    form: &mut ProfileEditForm,
    result: SubmissionResult,
) -> DomainUpdateResult {
    form.state.submission = SubmissionState::Idle;

    match result {
        Ok(SubmitSuccess { password, user }) => {
            let message = match password {
                PasswordChange::Failed(reason) => format!(
                    "Profile updated, but the password could not be changed: {}",
                    reason
                ),
                PasswordChange::NotRequested | PasswordChange::Updated => {
                    String::new()
                }
            };
            form.state.password = SecureCredential::empty();
            if let Some(user) = user {
                debug!("[ProfileForm] Backend echoed {}", user.username);
                form.state.snapshot = user;
            }

            info!("[ProfileForm] Profile updated");
            DomainUpdateResult::events(vec![ProfileEvent::completed(
                CompletionOutcome::Success,
                message,
            )])
            .add_event(ProfileEvent::SessionRefreshRequested)
        }
        Err(err) => {
            match err.kind() {
                SubmitErrorKind::Structured => {
                    info!("[ProfileForm] Profile update rejected: {}", err)
                }
                SubmitErrorKind::Transport => {
                    error!("[ProfileForm] Error updating profile: {}", err)
                }
            }
            DomainUpdateResult::events(vec![ProfileEvent::completed(
                CompletionOutcome::Error,
                err.user_message(),
            )])
        }
    }
}

fn handle_cancel(form: &mut ProfileEditForm) -> DomainUpdateResult {
    form.close();
    DomainUpdateResult::events(vec![ProfileEvent::completed(
        CompletionOutcome::Cancel,
        "",
    )])
}
