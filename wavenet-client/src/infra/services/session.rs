//! Session collaborator: who is signed in and with which credential.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::RwLock;
use wavenet_model::UserSnapshot;

use super::{ServiceError, ServiceResult};
use crate::domains::auth::BearerToken;
use crate::infra::api_client::ApiClient;

#[async_trait]
pub trait SessionService: Send + Sync + Debug {
    /// Cached snapshot of the signed-in user, if any
    fn current_user(&self) -> Option<UserSnapshot>;

    /// Credential for backend calls
    async fn bearer_token(&self) -> ServiceResult<BearerToken>;

    /// Ask for the cached snapshot to be re-fetched. Fire and forget.
    fn request_refresh(&self);
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<BearerToken>,
    user: Option<UserSnapshot>,
}

/// Session backed by the WaveNet backend's current-user endpoint
#[derive(Clone, Debug)]
pub struct ApiSessionService {
    client: Arc<ApiClient>,
    inner: Arc<RwLock<SessionState>>,
}

impl ApiSessionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            inner: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Install the credential issued by the identity provider
    pub fn sign_in(&self, token: BearerToken) {
        let mut state = self.inner.write();
        state.token = Some(token);
        state.user = None;
    }

    pub fn sign_out(&self) {
        let mut state = self.inner.write();
        state.token = None;
        state.user = None;
        info!("[Session] Signed out");
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.read().token.is_some()
    }

    /// Re-fetch the snapshot now and cache it.
    ///
    /// A rejected credential signs the session out.
    pub async fn refresh(&self) -> ServiceResult<UserSnapshot> {
        let token = self.bearer_token().await?;

        match self.client.fetch_current_user(&token).await {
            Ok(user) => {
                debug!("[Session] Refreshed snapshot for {}", user.username);
                self.inner.write().user = Some(user.clone());
                Ok(user)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                if err == ServiceError::CredentialExpired {
                    warn!("[Session] Credential rejected during refresh");
                    self.sign_out();
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl SessionService for ApiSessionService {
    fn current_user(&self) -> Option<UserSnapshot> {
        self.inner.read().user.clone()
    }

    async fn bearer_token(&self) -> ServiceResult<BearerToken> {
        self.inner
            .read()
            .token
            .clone()
            .ok_or(ServiceError::NotAuthenticated)
    }

    fn request_refresh(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("[Session] Refresh requested outside a tokio runtime");
            return;
        };

        let session = self.clone();
        handle.spawn(async move {
            if let Err(err) = session.refresh().await {
                warn!("[Session] Background refresh failed: {}", err);
            }
        });
    }
}
