use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use wavenet_model::{ProfileUpdateRequest, ProfileUpdateResponse};

use super::ServiceResult;
use crate::domains::auth::BearerToken;
use crate::infra::api_client::ApiClient;

#[async_trait]
pub trait ProfileApiService: Send + Sync + Debug {
    /// Send a profile edit on behalf of the token's owner.
    ///
    /// A structured failure reported by the backend is returned as `Ok`
    /// with a non-success status; `Err` means no structured reply arrived.
    async fn update_profile(
        &self,
        token: &BearerToken,
        request: ProfileUpdateRequest,
    ) -> ServiceResult<ProfileUpdateResponse>;
}

#[derive(Clone, Debug)]
pub struct ProfileApiAdapter {
    client: Arc<ApiClient>,
}

impl ProfileApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileApiService for ProfileApiAdapter {
    async fn update_profile(
        &self,
        token: &BearerToken,
        request: ProfileUpdateRequest,
    ) -> ServiceResult<ProfileUpdateResponse> {
        Ok(self.client.update_profile(token, request).await?)
    }
}
