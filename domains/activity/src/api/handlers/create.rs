//! `POST /squads/activities` and `POST /squads/activities/bulk`

use axum::extract::State;
use axum::Json;
use bytes_auth::BotAuth;
use bytes_common::{Result, ValidatedJson};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::state::ActivityState;
use crate::domain::SquadActivity;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1))]
    pub guild_id: String,
    #[validate(length(min = 1))]
    pub user_id: String,
    pub squad_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub activity_type: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

pub async fn create_activity(
    _auth: BotAuth,
    State(state): State<ActivityState>,
    ValidatedJson(body): ValidatedJson<CreateActivityRequest>,
) -> Result<Json<SquadActivity>> {
    let created = state
        .service
        .record(
            &body.guild_id,
            &body.user_id,
            body.squad_id,
            &body.activity_type,
            body.metadata,
            state.clock.now(),
        )
        .await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkCreateActivityRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub activities: Vec<CreateActivityRequest>,
}

pub async fn create_activities_bulk(
    _auth: BotAuth,
    State(state): State<ActivityState>,
    ValidatedJson(body): ValidatedJson<BulkCreateActivityRequest>,
) -> Result<Json<Vec<SquadActivity>>> {
    let now = state.clock.now();
    let rows: Vec<SquadActivity> = body
        .activities
        .into_iter()
        .map(|a| SquadActivity {
            id: Uuid::new_v4(),
            guild_id: a.guild_id,
            user_id: a.user_id,
            squad_id: a.squad_id,
            activity_type: a.activity_type,
            metadata: a.metadata,
            created_at: now,
        })
        .collect();

    let created = state.service.record_bulk(&rows).await?;
    Ok(Json(created))
}
