//! `GET /guilds/{gid}/bytes/balance/{uid}`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;

use crate::api::state::LedgerState;
use crate::domain::entities::BytesBalance;

pub async fn get_balance(
    _auth: AnyAuth,
    State(state): State<LedgerState>,
    Path((guild_id, user_id)): Path<(String, String)>,
) -> Result<Json<BytesBalance>> {
    let now = state.clock.now();
    let config = state.repos.configs.get_or_create(&guild_id, now).await?;
    let balance = state
        .repos
        .balances
        .get_or_create(&guild_id, &user_id, config.starting_balance, now)
        .await?;
    Ok(Json(balance))
}
