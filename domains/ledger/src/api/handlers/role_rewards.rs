//! `GET /guilds/{gid}/bytes/role-rewards/pending`, `POST .../role-rewards/{id}/ack`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::BotAuth;
use bytes_common::Result;
use uuid::Uuid;

use crate::api::state::LedgerState;
use crate::domain::entities::RoleRewardGrant;

pub async fn list_pending(
    _auth: BotAuth,
    State(state): State<LedgerState>,
    Path(guild_id): Path<String>,
) -> Result<Json<Vec<RoleRewardGrant>>> {
    let pending = state.repos.role_rewards.pending(&guild_id).await?;
    Ok(Json(pending))
}

pub async fn ack(
    _auth: BotAuth,
    State(state): State<LedgerState>,
    Path((guild_id, id)): Path<(String, Uuid)>,
) -> Result<Json<RoleRewardGrant>> {
    let grant = state
        .repos
        .role_rewards
        .ack(&guild_id, id, state.clock.now())
        .await?;
    Ok(Json(grant))
}
