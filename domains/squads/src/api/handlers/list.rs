//! `GET /guilds/{gid}/squads`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;

use crate::api::state::SquadsState;
use crate::domain::entities::SquadListing;

pub async fn list_squads(
    _auth: AnyAuth,
    State(state): State<SquadsState>,
    Path(guild_id): Path<String>,
) -> Result<Json<Vec<SquadListing>>> {
    let listings = state.service.list_squads(&guild_id).await?;
    Ok(Json(listings))
}
