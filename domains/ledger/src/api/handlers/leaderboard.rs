//! `GET /guilds/{gid}/bytes/leaderboard`

use axum::extract::{Path, Query, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;
use serde::Deserialize;

use crate::api::state::LedgerState;
use crate::domain::entities::LeaderboardEntry;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

pub async fn get_leaderboard(
    _auth: AnyAuth,
    State(state): State<LedgerState>,
    Path(guild_id): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let entries = state
        .repos
        .balances
        .leaderboard(&guild_id, limit, 0)
        .await?;
    Ok(Json(entries))
}
