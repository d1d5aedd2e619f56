mod password;
mod profile;
mod session;

pub use password::StubPasswordService;
pub use profile::{RecordedUpdate, StubProfileApi};
pub use session::StubSessionService;

use std::sync::Arc;

use wavenet_model::UserSnapshot;

use crate::infra::services::ProfileServices;

/// The three stub collaborators wired together
#[derive(Debug, Clone)]
pub struct StubServices {
    pub session: Arc<StubSessionService>,
    pub profile: Arc<StubProfileApi>,
    pub password: Arc<StubPasswordService>,
}

impl StubServices {
    /// Signed in as `user`, every call succeeding
    pub fn signed_in(user: UserSnapshot) -> Self {
        Self {
            session: Arc::new(StubSessionService::signed_in(user)),
            profile: Arc::new(StubProfileApi::new()),
            password: Arc::new(StubPasswordService::new()),
        }
    }

    pub fn services(&self) -> ProfileServices {
        ProfileServices::new(
            self.session.clone(),
            self.profile.clone(),
            self.password.clone(),
        )
    }
}
