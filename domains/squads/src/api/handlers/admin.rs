//! Admin-only squad CRUD and sale creation.

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::AdminAuth;
use bytes_common::{Result, ValidatedJson};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::state::SquadsState;
use crate::domain::entities::{SaleKind, Squad, SquadSale};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSquadRequest {
    #[validate(length(min = 1))]
    pub role_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub welcome_message: Option<String>,
    pub announcement_channel: Option<String>,
    #[validate(range(min = 0))]
    pub switch_cost: i64,
    pub max_members: Option<i32>,
    #[serde(default)]
    pub is_default: bool,
}

pub async fn create_squad(
    _auth: AdminAuth,
    State(state): State<SquadsState>,
    Path(guild_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateSquadRequest>,
) -> Result<Json<Squad>> {
    let created = state
        .repos
        .squads
        .create(
            &guild_id,
            &body.role_id,
            &body.name,
            body.description.as_deref(),
            body.welcome_message.as_deref(),
            body.announcement_channel.as_deref(),
            body.switch_cost,
            body.max_members,
            body.is_default,
            state.clock.now(),
        )
        .await?;
    Ok(Json(created))
}

/// A PATCH body for squad updates. `description`/`max_members` are present
/// but `null` clears the field; omitted leaves it unchanged. This handler
/// only supports the "set to a value" case — clearing either field back to
/// null requires a direct admin data fix, not exposed over this route.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSquadRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub switch_cost: Option<i64>,
    pub max_members: Option<i32>,
    pub is_active: Option<bool>,
}

pub async fn update_squad(
    _auth: AdminAuth,
    State(state): State<SquadsState>,
    Path((guild_id, squad_id)): Path<(String, Uuid)>,
    ValidatedJson(body): ValidatedJson<UpdateSquadRequest>,
) -> Result<Json<Squad>> {
    let updated = state
        .repos
        .squads
        .update(
            &guild_id,
            squad_id,
            body.name.as_deref(),
            body.description.as_deref().map(Some),
            body.switch_cost,
            body.max_members.map(Some),
            body.is_active,
            state.clock.now(),
        )
        .await?;
    Ok(Json(updated))
}

pub async fn delete_squad(
    _auth: AdminAuth,
    State(state): State<SquadsState>,
    Path((guild_id, squad_id)): Path<(String, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    state.repos.squads.delete(&guild_id, squad_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleRequest {
    pub kind: SaleKind,
    #[validate(range(min = 1, max = 99))]
    pub discount_percent: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

pub async fn create_sale(
    _auth: AdminAuth,
    State(state): State<SquadsState>,
    Path((_guild_id, squad_id)): Path<(String, Uuid)>,
    ValidatedJson(body): ValidatedJson<CreateSaleRequest>,
) -> Result<Json<SquadSale>> {
    let created = state
        .repos
        .sales
        .create(
            squad_id,
            body.kind,
            body.discount_percent,
            body.starts_at,
            body.ends_at,
        )
        .await?;
    Ok(Json(created))
}
