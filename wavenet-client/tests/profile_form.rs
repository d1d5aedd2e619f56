use wavenet_client::domains::profile::submission::{
    GENERIC_FAILURE_MESSAGE, SESSION_EXPIRED_MESSAGE,
};
use wavenet_client::domains::profile::validation::{
    PASSWORD_ERROR, USERNAME_ERROR,
};
use wavenet_client::domains::profile::intake::encode_data_url;
use wavenet_client::domains::profile::{FormError, ProfilePicture};
use wavenet_client::infra::services::ServiceError;
use wavenet_client::infra::testing::CompletionRecorder;
use wavenet_client::infra::testing::stubs::{StubServices, StubSessionService};
use wavenet_client::prelude::*;
use wavenet_model::ProfileUpdateResponse;

fn alice() -> UserSnapshot {
    UserSnapshot::new("alice", "/a.png", true)
}

fn open_form(
    stubs: &StubServices,
    config: FormConfig,
) -> (ProfileEditForm, CompletionRecorder) {
    let recorder = CompletionRecorder::new();
    let form =
        ProfileEditForm::open(stubs.services(), config, recorder.callback())
            .unwrap();
    (form, recorder)
}

fn png(bytes: usize) -> ImageFile {
    ImageFile::new("photo.png", "image/png", vec![7u8; bytes])
}

#[test]
fn opening_without_a_user_fails() {
    let stubs = StubServices::signed_in(alice());
    let services = ProfileServices::new(
        std::sync::Arc::new(StubSessionService::signed_out()),
        stubs.profile.clone(),
        stubs.password.clone(),
    );
    let recorder = CompletionRecorder::new();

    let result =
        ProfileEditForm::open(services, FormConfig::default(), recorder.callback());
    assert_eq!(result.err(), Some(FormError::NotAuthenticated));
}

#[test]
fn gate_follows_field_errors() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());
    assert!(form.can_submit());

    form.update(ProfileMessage::UsernameChanged("al".into()));
    assert!(!form.can_submit());
    assert_eq!(form.state().errors.get(Field::Username), USERNAME_ERROR);
    assert!(form.state().errors.is_invalid(Field::Username));

    form.update(ProfileMessage::PasswordChanged("12345".into()));
    assert_eq!(form.state().errors.get(Field::Password), PASSWORD_ERROR);

    form.update(ProfileMessage::UsernameChanged("alice2".into()));
    assert!(!form.can_submit());

    form.update(ProfileMessage::PasswordChanged("123456".into()));
    assert!(form.can_submit());
}

#[test]
fn usernames_with_spaces_are_invalid() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    form.update(ProfileMessage::UsernameChanged("al ice".into()));
    assert_eq!(form.state().errors.get(Field::Username), USERNAME_ERROR);
    assert_eq!(form.state().draft.username, "al ice");
}

#[test]
fn emptied_fields_follow_the_configured_policy() {
    let stubs = StubServices::signed_in(alice());
    let (mut lenient, _) = open_form(&stubs, FormConfig::default());
    lenient.update(ProfileMessage::UsernameChanged(String::new()));
    assert!(lenient.can_submit());

    let strict_config = FormConfig {
        allow_empty_as_no_change: false,
        ..FormConfig::default()
    };
    let (mut strict, _) = open_form(&stubs, strict_config);
    strict.update(ProfileMessage::UsernameChanged(String::new()));
    assert!(!strict.can_submit());
}

#[test]
fn visibility_toggles_back_and_forth() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());
    assert_eq!(form.state().visibility_label(), "Public");

    form.update(ProfileMessage::ToggleVisibility);
    assert!(!form.state().draft.public_profile);
    assert_eq!(form.state().visibility_label(), "Private");

    form.update(ProfileMessage::ToggleVisibility);
    assert!(form.state().draft.public_profile);
}

#[test]
fn oversized_picture_leaves_draft_and_preview_unchanged() {
    let stubs = StubServices::signed_in(alice());
    let config = FormConfig {
        max_upload_bytes: 16,
        ..FormConfig::default()
    };
    let (mut form, recorder) = open_form(&stubs, config);

    let result = form.update(ProfileMessage::PictureSelected(png(17)));

    assert!(result.is_empty());
    assert_eq!(
        form.state().draft.profile_picture,
        ProfilePicture::Current("/a.png".into())
    );
    assert_eq!(form.state().preview.as_str(), "/a.png");
    assert!(form.state().notice.is_some());
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn picture_at_the_limit_is_previewed() {
    let stubs = StubServices::signed_in(alice());
    let config = FormConfig {
        max_upload_bytes: 16,
        ..FormConfig::default()
    };
    let (mut form, _) = open_form(&stubs, config);

    form.dispatch(ProfileMessage::PictureSelected(png(16))).await;

    assert!(form.state().preview.is_data_url());
    assert!(
        form.state()
            .preview
            .as_str()
            .starts_with("data:image/png;base64,")
    );
    assert!(form.state().draft.profile_picture.pending_upload().is_some());
    assert!(form.state().notice.is_none());
}

#[test]
fn remove_photo_shows_the_default_image() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    form.update(ProfileMessage::RemovePicture);

    assert_eq!(form.state().draft.profile_picture, ProfilePicture::Default);
    assert_eq!(form.state().preview.as_str(), "/no_pfp.webp");
}

#[tokio::test]
async fn preview_superseded_by_remove_photo_is_discarded() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    let pending = form.update(ProfileMessage::PictureSelected(png(8)));
    form.update(ProfileMessage::RemovePicture);

    let message = pending.task.into_future().unwrap().await;
    assert!(matches!(message, ProfileMessage::PreviewRendered { .. }));
    form.update(message);

    assert_eq!(form.state().preview.as_str(), "/no_pfp.webp");
    assert_eq!(form.state().draft.profile_picture, ProfilePicture::Default);
}

#[tokio::test]
async fn older_selection_preview_is_discarded_for_newer_one() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());
    let older = png(8);
    let newer = ImageFile::new("newer.jpg", "image/jpeg", vec![3u8; 8]);

    let pending_older = form.update(ProfileMessage::PictureSelected(older));
    let pending_newer =
        form.update(ProfileMessage::PictureSelected(newer.clone()));

    let message = pending_older.task.into_future().unwrap().await;
    form.update(message);
    assert_eq!(form.state().preview.as_str(), "/a.png");

    let message = pending_newer.task.into_future().unwrap().await;
    form.update(message);
    assert_eq!(form.state().preview.as_str(), encode_data_url(&newer));
    assert_eq!(
        form.state().draft.profile_picture,
        ProfilePicture::Selected(newer)
    );
}

#[tokio::test]
async fn successful_edit_reports_success_and_refreshes_session() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::UsernameChanged("al".into())).await;
    assert!(!form.can_submit());
    form.dispatch(ProfileMessage::UsernameChanged("alice2".into()))
        .await;
    assert!(form.can_submit());

    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(
        recorder.calls(),
        vec![(CompletionOutcome::Success, String::new())]
    );
    assert_eq!(stubs.session.refresh_requests(), 1);

    let calls = stubs.profile.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].token, "stub-token");
    assert_eq!(calls[0].request.username.as_deref(), Some("alice2"));
    assert!(calls[0].request.public_profile);
    assert!(calls[0].request.file.is_none());
    assert!(!form.state().is_submitting());
}

#[tokio::test]
async fn selected_picture_is_uploaded_on_submit() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::PictureSelected(png(4))).await;
    form.dispatch(ProfileMessage::ToggleVisibility).await;
    form.dispatch(ProfileMessage::Submit).await;

    let calls = stubs.profile.calls();
    assert_eq!(calls[0].request.file, Some(png(4)));
    assert!(!calls[0].request.public_profile);
}

#[tokio::test]
async fn echoed_user_replaces_the_snapshot() {
    let stubs = StubServices::signed_in(alice());
    let updated = UserSnapshot::new("alice2", "/b.png", false);
    stubs.profile.respond_with(Ok(ProfileUpdateResponse {
        user: Some(updated.clone()),
        ..ProfileUpdateResponse::success()
    }));
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::UsernameChanged("alice2".into()))
        .await;
    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(form.state().snapshot, updated);
}

#[tokio::test]
async fn snapshot_is_kept_when_backend_echoes_nothing() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(form.state().snapshot, alice());
}

#[tokio::test]
async fn rejected_edit_reports_server_message_without_refresh() {
    let stubs = StubServices::signed_in(alice());
    stubs
        .profile
        .respond_with(Ok(ProfileUpdateResponse::failure("username taken")));
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::UsernameChanged("bob".into())).await;
    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(
        recorder.calls(),
        vec![(CompletionOutcome::Error, "username taken".to_string())]
    );
    assert_eq!(stubs.session.refresh_requests(), 0);
    assert!(!form.state().is_submitting());
    assert!(!form.is_closed());
}

#[tokio::test]
async fn transport_failure_reports_generic_message() {
    let stubs = StubServices::signed_in(alice());
    stubs
        .profile
        .respond_with(Err(ServiceError::Transport("connection reset".into())));
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(
        recorder.last(),
        Some((CompletionOutcome::Error, GENERIC_FAILURE_MESSAGE.to_string()))
    );
    assert_eq!(stubs.session.refresh_requests(), 0);
}

#[tokio::test]
async fn expired_session_reports_sign_in_message() {
    let stubs = StubServices::signed_in(alice());
    stubs.session.expire_token();
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(
        recorder.last(),
        Some((CompletionOutcome::Error, SESSION_EXPIRED_MESSAGE.to_string()))
    );
    assert_eq!(stubs.profile.call_count(), 0);
}

#[tokio::test]
async fn password_is_changed_once_after_profile_success() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::PasswordChanged("abc123".into()))
        .await;
    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(stubs.profile.call_count(), 1);
    assert_eq!(stubs.password.requested(), vec!["abc123".to_string()]);
    assert_eq!(
        recorder.calls(),
        vec![(CompletionOutcome::Success, String::new())]
    );
    assert!(form.state().password.is_empty());
}

#[tokio::test]
async fn password_is_not_changed_when_profile_update_fails() {
    let stubs = StubServices::signed_in(alice());
    stubs
        .profile
        .respond_with(Ok(ProfileUpdateResponse::failure("nope")));
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::PasswordChanged("abc123".into()))
        .await;
    form.dispatch(ProfileMessage::Submit).await;

    assert!(stubs.password.requested().is_empty());
}

#[tokio::test]
async fn empty_password_is_never_sent() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, _) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::PasswordChanged("abc123".into()))
        .await;
    form.dispatch(ProfileMessage::PasswordChanged("".into())).await;
    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(stubs.profile.call_count(), 1);
    assert!(stubs.password.requested().is_empty());
}

#[tokio::test]
async fn password_failure_after_profile_success_is_reported() {
    let stubs = StubServices::signed_in(alice());
    stubs.password.respond_with(Err(ServiceError::CredentialExpired));
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::PasswordChanged("abc123".into()))
        .await;
    form.dispatch(ProfileMessage::Submit).await;

    let (outcome, message) = recorder.last().unwrap();
    assert_eq!(outcome, CompletionOutcome::Success);
    assert!(message.starts_with("Profile updated, but the password"));
    assert_eq!(stubs.session.refresh_requests(), 1);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_ignored() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    let first = form.update(ProfileMessage::Submit);
    assert!(form.state().is_submitting());
    assert!(!form.can_submit());

    let second = form.update(ProfileMessage::Submit);
    assert!(second.is_empty());

    let finished = first.task.into_future().unwrap().await;
    let result = form.update(finished);
    for event in result.events {
        form.apply_event(event);
    }

    assert_eq!(stubs.profile.call_count(), 1);
    assert_eq!(recorder.calls().len(), 1);
    assert!(!form.state().is_submitting());
}

#[tokio::test]
async fn submit_with_field_errors_does_nothing() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::UsernameChanged("a b".into())).await;
    form.dispatch(ProfileMessage::Submit).await;

    assert_eq!(stubs.profile.call_count(), 0);
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn cancel_closes_and_reports() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.dispatch(ProfileMessage::UsernameChanged("bob".into())).await;
    form.dispatch(ProfileMessage::Cancel).await;

    assert!(form.is_closed());
    assert!(form.lifetime().is_cancelled());
    assert_eq!(
        recorder.calls(),
        vec![(CompletionOutcome::Cancel, String::new())]
    );

    form.dispatch(ProfileMessage::Submit).await;
    assert_eq!(stubs.profile.call_count(), 0);
    assert_eq!(recorder.calls().len(), 1);
}

#[tokio::test]
async fn results_arriving_after_close_are_dropped() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    let pending = form.update(ProfileMessage::Submit);
    form.close();

    let finished = pending.task.into_future().unwrap().await;
    let result = form.update(finished);

    assert!(result.is_empty());
    assert!(recorder.calls().is_empty());
    assert_eq!(stubs.session.refresh_requests(), 0);
}

#[tokio::test]
async fn lifetime_cancelled_by_host_closes_the_form() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    form.lifetime().cancel();
    assert!(form.is_closed());
    assert!(!form.can_submit());

    form.dispatch(ProfileMessage::Submit).await;
    form.dispatch(ProfileMessage::PictureSelected(png(4))).await;

    assert!(!form.state().is_submitting());
    assert_eq!(
        form.state().draft.profile_picture,
        ProfilePicture::Current("/a.png".into())
    );
    assert_eq!(stubs.profile.call_count(), 0);
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn lifetime_cancelled_mid_submission_leaves_submitting() {
    let stubs = StubServices::signed_in(alice());
    let (mut form, recorder) = open_form(&stubs, FormConfig::default());

    let pending = form.update(ProfileMessage::Submit);
    assert!(form.state().is_submitting());
    form.lifetime().cancel();

    let finished = pending.task.into_future().unwrap().await;
    let result = form.update(finished);

    assert!(result.is_empty());
    assert!(form.is_closed());
    assert!(!form.state().is_submitting());
    assert!(recorder.calls().is_empty());
}
