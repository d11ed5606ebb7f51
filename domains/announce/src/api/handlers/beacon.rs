//! `POST /guilds/{gid}/beacon`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::BotAuth;
use bytes_common::{Result, ValidatedJson};
use serde::Deserialize;
use validator::Validate;

use crate::api::state::AnnounceState;
use crate::domain::BeaconAck;

#[derive(Debug, Deserialize, Validate)]
pub struct SendBeaconRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub channel_id: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1))]
    pub identity_name: String,
    pub identity_avatar_url: Option<String>,
    pub role_id: Option<String>,
}

pub async fn send_beacon(
    _auth: BotAuth,
    State(state): State<AnnounceState>,
    Path(guild_id): Path<String>,
    ValidatedJson(body): ValidatedJson<SendBeaconRequest>,
) -> Result<Json<BeaconAck>> {
    let ack = state
        .service
        .send_beacon(
            &guild_id,
            &body.user_id,
            &body.channel_id,
            &body.content,
            &body.identity_name,
            body.identity_avatar_url.as_deref(),
            body.role_id.as_deref(),
        )
        .await?;
    Ok(Json(ack))
}
