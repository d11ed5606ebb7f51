//! `GET /guilds/{gid}/users/{uid}/squad`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;

use crate::api::state::SquadsState;
use crate::domain::entities::UserSquadResponse;

pub async fn get_user_squad(
    _auth: AnyAuth,
    State(state): State<SquadsState>,
    Path((guild_id, user_id)): Path<(String, String)>,
) -> Result<Json<UserSquadResponse>> {
    let response = state.service.get_user_squad(&guild_id, &user_id).await?;
    Ok(Json(response))
}
