//! `GET /guilds/{gid}/activities/{stats,count,recent}`

use axum::extract::{Path, Query, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;
use serde::{Deserialize, Serialize};

use crate::api::state::ActivityState;
use crate::domain::SquadActivity;

#[derive(Debug, Deserialize)]
pub struct TypeFilterQuery {
    pub activity_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityStats {
    pub total_activities: i64,
    pub positive_activities: i64,
    pub negative_activities: i64,
}

pub async fn stats(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(guild_id): Path<String>,
) -> Result<Json<ActivityStats>> {
    let total = state.service.count(&guild_id, None).await?;
    let mut positive = 0i64;
    for activity_type in crate::domain::entities::POSITIVE_ACTIVITY_TYPES {
        positive += state.service.count(&guild_id, Some(activity_type)).await?;
    }
    let mut negative = 0i64;
    for activity_type in crate::domain::entities::NEGATIVE_ACTIVITY_TYPES {
        negative += state.service.count(&guild_id, Some(activity_type)).await?;
    }
    Ok(Json(ActivityStats {
        total_activities: total,
        positive_activities: positive,
        negative_activities: negative,
    }))
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

pub async fn count(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(guild_id): Path<String>,
    Query(query): Query<TypeFilterQuery>,
) -> Result<Json<CountResponse>> {
    let count = state
        .service
        .count(&guild_id, query.activity_type.as_deref())
        .await?;
    Ok(Json(CountResponse { count }))
}

pub async fn recent(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(guild_id): Path<String>,
    Query(query): Query<TypeFilterQuery>,
) -> Result<Json<Vec<SquadActivity>>> {
    let rows = state
        .service
        .list(&guild_id, query.activity_type.as_deref(), 20, 0)
        .await?;
    Ok(Json(rows))
}
