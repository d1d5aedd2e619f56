//! Password changes against the identity provider.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use wavenet_model::routes;

use super::{ServiceError, ServiceResult, SessionService};
use crate::domains::auth::SecureCredential;

#[async_trait]
pub trait PasswordService: Send + Sync + Debug {
    /// Change the signed-in principal's password.
    ///
    /// Fails with [`ServiceError::CredentialExpired`] when the principal's
    /// sign-in is too old, and [`ServiceError::Rejected`] when the provider
    /// refuses the password.
    async fn update_password(
        &self,
        new_password: SecureCredential,
    ) -> ServiceResult<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountsUpdateRequest<'a> {
    id_token: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// Map an identity provider error message such as
/// `WEAK_PASSWORD : Password should be at least 6 characters` to a
/// service error.
pub fn map_provider_error(message: &str) -> ServiceError {
    let (code, detail) = match message.split_once(':') {
        Some((code, detail)) => (code.trim(), detail.trim()),
        None => (message.trim(), ""),
    };

    match code {
        "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" | "TOKEN_EXPIRED"
        | "INVALID_ID_TOKEN" | "USER_NOT_FOUND" | "USER_DISABLED" => {
            ServiceError::CredentialExpired
        }
        "WEAK_PASSWORD" if !detail.is_empty() => {
            ServiceError::Rejected(detail.to_string())
        }
        "WEAK_PASSWORD" => {
            ServiceError::Rejected("Password is too weak".to_string())
        }
        "" => ServiceError::InvalidResponse("empty provider error".into()),
        other => ServiceError::Rejected(other.to_string()),
    }
}

/// Password updates through the identity provider's `accounts:update`
/// REST call, authorised by the session's current ID token.
#[derive(Clone)]
pub struct IdentityToolkitPasswordService {
    http: Client,
    /// Carries the API key in its query string
    update_url: Url,
    session: Arc<dyn SessionService>,
}

impl Debug for IdentityToolkitPasswordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityToolkitPasswordService")
            .field("host", &self.update_url.host_str())
            .field("session", &self.session)
            .finish()
    }
}

impl IdentityToolkitPasswordService {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        session: Arc<dyn SessionService>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        let update_url = accounts_update_url(endpoint, api_key)?;

        Ok(Self {
            http,
            update_url,
            session,
        })
    }
}

fn accounts_update_url(endpoint: &str, api_key: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(endpoint)?.join(routes::IDENTITY_ACCOUNTS_UPDATE)?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

#[async_trait]
impl PasswordService for IdentityToolkitPasswordService {
    async fn update_password(
        &self,
        new_password: SecureCredential,
    ) -> ServiceResult<()> {
        let token = self.session.bearer_token().await?;
        let body = AccountsUpdateRequest {
            id_token: token.as_str(),
            password: new_password.as_str(),
            return_secure_token: true,
        };

        let response = self
            .http
            .post(self.update_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("[Password] Password updated");
            return Ok(());
        }

        let text = response
            .text()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        let err = match serde_json::from_str::<ProviderErrorBody>(&text) {
            Ok(body) => map_provider_error(&body.error.message),
            Err(_) => ServiceError::InvalidResponse(format!(
                "status {}: {}",
                status, text
            )),
        };
        warn!("[Password] Password update failed: {}", err);
        Err(err)
    }
}

/// Used when no identity provider is configured.
#[derive(Clone, Debug, Default)]
pub struct DisabledPasswordService;

#[async_trait]
impl PasswordService for DisabledPasswordService {
    async fn update_password(
        &self,
        _new_password: SecureCredential,
    ) -> ServiceResult<()> {
        Err(ServiceError::Unsupported(
            "Password changes are not available yet".to_string(),
        ))
    }
}
