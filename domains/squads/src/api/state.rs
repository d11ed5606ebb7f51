//! Squads domain state

use std::sync::Arc;

use axum::extract::FromRef;
use bytes_auth::AuthConfig;
use bytes_common::Clock;

use crate::domain::campaign::CampaignGate;
use crate::domain::service::SquadService;
use crate::repository::SquadRepositories;

/// Application state for the Squads domain.
#[derive(Clone)]
pub struct SquadsState {
    pub repos: SquadRepositories,
    pub service: SquadService,
    pub auth: AuthConfig,
    pub clock: Arc<dyn Clock>,
}

impl SquadsState {
    pub fn new(
        repos: SquadRepositories,
        auth: AuthConfig,
        clock: Arc<dyn Clock>,
        campaign: Arc<dyn CampaignGate>,
    ) -> Self {
        let service = SquadService::new(repos.clone(), clock.clone(), campaign);
        Self {
            repos,
            service,
            auth,
            clock,
        }
    }
}

impl FromRef<SquadsState> for AuthConfig {
    fn from_ref(state: &SquadsState) -> Self {
        state.auth.clone()
    }
}
