//! Ledger domain state

use std::sync::Arc;

use axum::extract::FromRef;
use bytes_auth::AuthConfig;
use bytes_common::Clock;

use crate::domain::service::LedgerService;
use crate::repository::LedgerRepositories;

/// Application state for the Ledger domain.
#[derive(Clone)]
pub struct LedgerState {
    pub repos: LedgerRepositories,
    pub service: LedgerService,
    pub auth: AuthConfig,
    pub clock: Arc<dyn Clock>,
    /// Guild reference IANA timezone used for calendar-date arithmetic
    /// (daily claim eligibility, streak continuation).
    pub default_timezone: String,
}

impl LedgerState {
    pub fn new(
        repos: LedgerRepositories,
        auth: AuthConfig,
        clock: Arc<dyn Clock>,
        default_timezone: impl Into<String>,
    ) -> Self {
        let service = LedgerService::new(repos.clone(), clock.clone());
        Self {
            repos,
            service,
            auth,
            clock,
            default_timezone: default_timezone.into(),
        }
    }
}

impl FromRef<LedgerState> for AuthConfig {
    fn from_ref(state: &LedgerState) -> Self {
        state.auth.clone()
    }
}
