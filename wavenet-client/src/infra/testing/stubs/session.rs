use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use wavenet_model::UserSnapshot;

use crate::domains::auth::BearerToken;
use crate::infra::services::{ServiceError, ServiceResult, SessionService};

pub const STUB_TOKEN: &str = "stub-token";

#[derive(Debug, Clone)]
pub struct StubSessionService {
    inner: Arc<RwLock<InnerSessionState>>,
}

#[derive(Debug, Clone)]
struct InnerSessionState {
    user: Option<UserSnapshot>,
    token: Option<BearerToken>,
    refresh_requests: usize,
}

impl StubSessionService {
    pub fn signed_in(user: UserSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerSessionState {
                user: Some(user),
                token: Some(BearerToken::new(STUB_TOKEN)),
                refresh_requests: 0,
            })),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerSessionState {
                user: None,
                token: None,
                refresh_requests: 0,
            })),
        }
    }

    /// Keep the user but drop the credential
    pub fn expire_token(&self) {
        self.inner.write().token = None;
    }

    pub fn refresh_requests(&self) -> usize {
        self.inner.read().refresh_requests
    }
}

#[async_trait]
impl SessionService for StubSessionService {
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
        self.inner.write().refresh_requests += 1;
    }
}
