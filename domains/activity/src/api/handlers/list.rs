//! `GET /guilds/{gid}/activities` and `GET /squads/{sid}/activities`

use axum::extract::{Path, Query, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::state::ActivityState;
use crate::domain::SquadActivity;

#[derive(Debug, Deserialize)]
pub struct ListActivitiesQuery {
    pub activity_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_guild_activities(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(guild_id): Path<String>,
    Query(query): Query<ListActivitiesQuery>,
) -> Result<Json<Vec<SquadActivity>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    let offset = query.offset.unwrap_or(0).max(0);
    let rows = state
        .service
        .list(&guild_id, query.activity_type.as_deref(), limit, offset)
        .await?;
    Ok(Json(rows))
}

pub async fn list_squad_activities(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(squad_id): Path<Uuid>,
) -> Result<Json<Vec<SquadActivity>>> {
    let rows = state
        .service
        .window(squad_id, 30, state.clock.now())
        .await?;
    Ok(Json(rows))
}
