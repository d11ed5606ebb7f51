//! `POST /guilds/{gid}/squads/{sid}/join`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::BotAuth;
use bytes_common::{Result, ValidatedJson};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::state::SquadsState;
use crate::domain::entities::JoinResult;

#[derive(Debug, Deserialize, Validate)]
pub struct JoinSquadRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub username: String,
}

pub async fn join_squad(
    _auth: BotAuth,
    State(state): State<SquadsState>,
    Path((guild_id, squad_id)): Path<(String, Uuid)>,
    ValidatedJson(body): ValidatedJson<JoinSquadRequest>,
) -> Result<Json<JoinResult>> {
    let result = state
        .service
        .join_squad(&guild_id, &body.user_id, &body.username, squad_id)
        .await?;
    Ok(Json(result))
}
