//! Wiring of the real collaborators from configuration.

use std::sync::Arc;

use anyhow::Context;
use log::info;

use crate::domains::auth::BearerToken;
use crate::domains::profile::{CompletionCallback, ProfileEditForm};
use crate::infra::api_client::ApiClient;
use crate::infra::config::Config;
use crate::infra::services::{
    ApiSessionService, DisabledPasswordService,
    IdentityToolkitPasswordService, PasswordService, ProfileApiAdapter,
    ProfileServices,
};

/// Sign in with `token`, fetch the current user and build the service
/// bundle the profile form needs.
pub async fn connect(
    config: &Config,
    token: BearerToken,
) -> anyhow::Result<ProfileServices> {
    let timeout = config.request_timeout();
    let client = Arc::new(ApiClient::new(&config.backend_url, timeout)?);

    let session = Arc::new(ApiSessionService::new(client.clone()));
    session.sign_in(token);
    let user = session
        .refresh()
        .await
        .context("Failed to load the signed-in user")?;
    info!("[Bootstrap] Signed in as {}", user.username);

    let password: Arc<dyn PasswordService> = match &config.identity_api_key {
        Some(api_key) => Arc::new(IdentityToolkitPasswordService::new(
            &config.identity_endpoint,
            api_key,
            session.clone(),
            timeout,
        )?),
        None => {
            info!("[Bootstrap] No identity API key, password changes disabled");
            Arc::new(DisabledPasswordService)
        }
    };

    Ok(ProfileServices::new(
        session,
        Arc::new(ProfileApiAdapter::new(client)),
        password,
    ))
}

/// Connect and open a profile form in one step
pub async fn open_profile_form(
    config: &Config,
    token: BearerToken,
    on_complete: CompletionCallback,
) -> anyhow::Result<ProfileEditForm> {
    let services = connect(config, token).await?;
    Ok(ProfileEditForm::open(
        services,
        config.form.clone(),
        on_complete,
    )?)
}
