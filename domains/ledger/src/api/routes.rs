//! Route definitions for the Ledger domain API

use axum::{routing::get, Router};

use super::handlers::{balance, config, daily, history, leaderboard, role_rewards, transfer};
use super::state::LedgerState;

fn balance_routes() -> Router<LedgerState> {
    Router::new().route("/guilds/{gid}/bytes/balance/{uid}", get(balance::get_balance))
}

fn daily_routes() -> Router<LedgerState> {
    Router::new().route("/guilds/{gid}/bytes/daily", axum::routing::post(daily::claim_daily))
}

fn transfer_routes() -> Router<LedgerState> {
    Router::new().route(
        "/guilds/{gid}/bytes/transfer",
        axum::routing::post(transfer::transfer),
    )
}

fn leaderboard_routes() -> Router<LedgerState> {
    Router::new().route(
        "/guilds/{gid}/bytes/leaderboard",
        get(leaderboard::get_leaderboard),
    )
}

fn history_routes() -> Router<LedgerState> {
    Router::new().route(
        "/guilds/{gid}/bytes/transactions",
        get(history::get_transactions),
    )
}

fn config_routes() -> Router<LedgerState> {
    Router::new().route(
        "/guilds/{gid}/bytes/config",
        get(config::get_config).put(config::update_config),
    )
}

fn role_reward_routes() -> Router<LedgerState> {
    Router::new()
        .route(
            "/guilds/{gid}/bytes/role-rewards/pending",
            get(role_rewards::list_pending),
        )
        .route(
            "/guilds/{gid}/bytes/role-rewards/{id}/ack",
            axum::routing::post(role_rewards::ack),
        )
}

/// Create all Ledger domain API routes.
pub fn routes() -> Router<LedgerState> {
    Router::new()
        .merge(balance_routes())
        .merge(daily_routes())
        .merge(transfer_routes())
        .merge(leaderboard_routes())
        .merge(history_routes())
        .merge(config_routes())
        .merge(role_reward_routes())
}
