use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use wavenet_model::{ProfileUpdateRequest, ProfileUpdateResponse};

use crate::domains::auth::BearerToken;
use crate::infra::services::{ProfileApiService, ServiceResult};

/// One call seen by [`StubProfileApi`]
#[derive(Debug, Clone)]
pub struct RecordedUpdate {
    pub token: String,
    pub request: ProfileUpdateRequest,
}

/// Answers from a script, then with success once the script runs out
#[derive(Debug, Clone, Default)]
pub struct StubProfileApi {
    inner: Arc<Mutex<InnerProfileApi>>,
}

#[derive(Debug, Default)]
struct InnerProfileApi {
    script: VecDeque<ServiceResult<ProfileUpdateResponse>>,
    calls: Vec<RecordedUpdate>,
}

impl StubProfileApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next call
    pub fn respond_with(&self, response: ServiceResult<ProfileUpdateResponse>) {
        self.inner.lock().script.push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedUpdate> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

#[async_trait]
impl ProfileApiService for StubProfileApi {
    async fn update_profile(
        &self,
        token: &BearerToken,
        request: ProfileUpdateRequest,
    ) -> ServiceResult<ProfileUpdateResponse> {
        let mut inner = self.inner.lock();
        inner.calls.push(RecordedUpdate {
            token: token.as_str().to_string(),
            request,
        });
        inner
            .script
            .pop_front()
            .unwrap_or_else(|| Ok(ProfileUpdateResponse::success()))
    }
}
