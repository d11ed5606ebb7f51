//! Activity domain state

use std::sync::Arc;

use axum::extract::FromRef;
use bytes_auth::AuthConfig;
use bytes_common::Clock;

use crate::domain::service::ActivityService;
use crate::repository::ActivityRepositories;

#[derive(Clone)]
pub struct ActivityState {
    pub repos: ActivityRepositories,
    pub service: ActivityService,
    pub auth: AuthConfig,
    pub clock: Arc<dyn Clock>,
}

impl ActivityState {
    pub fn new(repos: ActivityRepositories, auth: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let service = ActivityService::new(repos.clone());
        Self {
            repos,
            service,
            auth,
            clock,
        }
    }
}

impl FromRef<ActivityState> for AuthConfig {
    fn from_ref(state: &ActivityState) -> Self {
        state.auth.clone()
    }
}
