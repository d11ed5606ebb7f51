//! Application composition root
//!
//! Composes the ledger, squads, activity, and announce domain routers,
//! plus the top-level auth-introspection routes, into a single service.

pub mod auth_routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use bytes_activity::{ActivityRepositories, ActivityState};
use bytes_announce::{AnnounceRepositories, AnnounceState, HttpWebhookPort};
use bytes_auth::AuthConfig;
use bytes_common::{Clock, Config, SystemClock};
use bytes_ledger::{LedgerRepositories, LedgerState};
use bytes_squads::{ConfigCampaignGate, SquadRepositories, SquadsState};
use sqlx::PgPool;

use auth_routes::AuthRoutesState;

/// Create the main application router with all routes and middleware.
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth = AuthConfig::new(config.bot_api_key.clone(), config.admin_api_key.clone());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let ledger_repos = LedgerRepositories::new(pool.clone());
    let ledger_state = LedgerState::new(
        ledger_repos,
        auth.clone(),
        clock.clone(),
        config.guild_default_timezone.clone(),
    );

    let ledger_configs = bytes_ledger::repository::GuildConfigRepository::new(pool.clone());

    let squads_repos = SquadRepositories::new(pool.clone());
    let campaign = Arc::new(ConfigCampaignGate::new(ledger_configs.clone()));
    let squads_state = SquadsState::new(squads_repos, auth.clone(), clock.clone(), campaign);

    let activity_repos = ActivityRepositories::new(pool.clone());
    let activity_state = ActivityState::new(activity_repos, auth.clone(), clock.clone());

    let announce_repos = AnnounceRepositories::new(pool.clone());
    let webhook_timeout = Duration::from_millis(config.webhook_timeout_ms);
    let webhook: Arc<dyn bytes_announce::WebhookPort> =
        Arc::new(HttpWebhookPort::new(webhook_timeout));
    let announce_state =
        AnnounceState::new(announce_repos, ledger_configs, webhook, clock.clone(), auth.clone());

    let auth_routes_state = AuthRoutesState { auth, pool };

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth_routes::routes().with_state(auth_routes_state))
                .merge(bytes_ledger::api::routes().with_state(ledger_state))
                .merge(bytes_squads::api::routes().with_state(squads_state))
                .merge(bytes_activity::api::routes().with_state(activity_state))
                .merge(bytes_announce::api::routes().with_state(announce_state)),
        );

    Ok(app)
}

async fn health_check() -> &'static str {
    "OK"
}
