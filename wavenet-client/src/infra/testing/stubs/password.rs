use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domains::auth::SecureCredential;
use crate::infra::services::{PasswordService, ServiceResult};

/// Records requested passwords; succeeds unless told otherwise
#[derive(Debug, Clone, Default)]
pub struct StubPasswordService {
    inner: Arc<Mutex<InnerPasswordService>>,
}

#[derive(Debug, Default)]
struct InnerPasswordService {
    script: VecDeque<ServiceResult<()>>,
    requested: Vec<SecureCredential>,
}

impl StubPasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, result: ServiceResult<()>) {
        self.inner.lock().script.push_back(result);
    }

    /// Passwords requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.inner
            .lock()
            .requested
            .iter()
            .map(|password| password.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl PasswordService for StubPasswordService {
    async fn update_password(
        &self,
        new_password: SecureCredential,
    ) -> ServiceResult<()> {
        let mut inner = self.inner.lock();
        inner.requested.push(new_password);
        inner.script.pop_front().unwrap_or(Ok(()))
    }
}
