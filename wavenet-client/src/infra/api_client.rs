use std::time::Duration;

use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wavenet_model::{
    CurrentUserResponse, ProfileUpdateRequest, ProfileUpdateResponse,
    UserSnapshot, routes,
};

use crate::domains::auth::BearerToken;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized - please sign in again")]
    Unauthorized,

    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP client for the WaveNet backend
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self { client, base_url })
    }

    /// Build an absolute URL from a backend path
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(
        &self,
        builder: RequestBuilder,
        token: &BearerToken,
    ) -> RequestBuilder {
        builder.header(reqwest::header::AUTHORIZATION, token.header_value())
    }

    /// `PATCH /auth/user` with a multipart body.
    ///
    /// The backend answers failures with the same JSON schema as success
    /// (and a 4xx status), so any body that parses is handed back as-is.
    pub async fn update_profile(
        &self,
        token: &BearerToken,
        request: ProfileUpdateRequest,
    ) -> ApiResult<ProfileUpdateResponse> {
        let url = self.build_url(routes::AUTH_USER);
        let form = build_profile_form(request)?;

        debug!("[ApiClient] PATCH {}", url);
        let builder = self.client.patch(&url).multipart(form);
        let response = self.authorize(builder, token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ProfileUpdateResponse>(&body) {
            Ok(parsed) => {
                if !status.is_success() {
                    warn!(
                        "[ApiClient] Profile update answered {} with status '{}'",
                        status, parsed.status
                    );
                }
                Ok(parsed)
            }
            Err(_) if status == StatusCode::UNAUTHORIZED => {
                Err(ApiError::Unauthorized)
            }
            Err(err) if status.is_success() => {
                Err(ApiError::Decode(err.to_string()))
            }
            Err(_) => Err(ApiError::Status { status, body }),
        }
    }

    /// `GET /auth/user`: the signed-in user's current record
    pub async fn fetch_current_user(
        &self,
        token: &BearerToken,
    ) -> ApiResult<UserSnapshot> {
        let url = self.build_url(routes::AUTH_USER);

        debug!("[ApiClient] GET {}", url);
        let request = self.authorize(self.client.get(&url), token);
        let response: CurrentUserResponse =
            self.execute_request(request).await?;
        Ok(response.user)
    }

    /// Execute a request and handle common errors
    async fn execute_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|err| ApiError::Decode(err.to_string()))
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ApiError::Status { status, body })
            }
        }
    }
}

/// Serialize a profile edit into its multipart body.
///
/// `username` is only present when set, `public_profile` always is, and
/// `file` only when a new image was picked.
pub fn build_profile_form(request: ProfileUpdateRequest) -> ApiResult<Form> {
    let mut form = Form::new().text(
        ProfileUpdateRequest::PUBLIC_PROFILE_FIELD,
        request.public_profile_value(),
    );

    if let Some(username) = request.username {
        form = form.text(ProfileUpdateRequest::USERNAME_FIELD, username);
    }

    if let Some(file) = request.file {
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|err| ApiError::InvalidUpload(err.to_string()))?;
        form = form.part(ProfileUpdateRequest::FILE_FIELD, part);
    }

    Ok(form)
}
