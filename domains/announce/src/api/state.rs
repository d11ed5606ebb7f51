//! Announce domain state

use std::sync::Arc;

use axum::extract::FromRef;
use bytes_auth::AuthConfig;
use bytes_common::Clock;
use bytes_ledger::repository::GuildConfigRepository;

use crate::domain::service::AnnounceService;
use crate::domain::webhook::WebhookPort;
use crate::repository::AnnounceRepositories;

#[derive(Clone)]
pub struct AnnounceState {
    pub service: AnnounceService,
    pub auth: AuthConfig,
}

impl AnnounceState {
    pub fn new(
        repos: AnnounceRepositories,
        configs: GuildConfigRepository,
        webhook: Arc<dyn WebhookPort>,
        clock: Arc<dyn Clock>,
        auth: AuthConfig,
    ) -> Self {
        let service = AnnounceService::new(repos, configs, webhook, clock);
        Self { service, auth }
    }
}

impl FromRef<AnnounceState> for AuthConfig {
    fn from_ref(state: &AnnounceState) -> Self {
        state.auth.clone()
    }
}
