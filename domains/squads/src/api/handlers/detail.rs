//! `GET /guilds/{gid}/squads/{sid}`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;
use uuid::Uuid;

use crate::api::state::SquadsState;
use crate::domain::entities::Squad;

pub async fn get_squad(
    _auth: AnyAuth,
    State(state): State<SquadsState>,
    Path((guild_id, squad_id)): Path<(String, Uuid)>,
) -> Result<Json<Squad>> {
    let squad = state.service.get_squad(&guild_id, squad_id).await?;
    Ok(Json(squad))
}
