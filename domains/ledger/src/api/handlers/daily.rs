//! `POST /guilds/{gid}/bytes/daily`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::BotAuth;
use bytes_common::Result;
use serde::Deserialize;
use validator::Validate;

use crate::api::state::LedgerState;
use crate::domain::entities::DailyClaimResult;
use bytes_common::ValidatedJson;

#[derive(Debug, Deserialize, Validate)]
pub struct ClaimDailyRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub username: String,
}

pub async fn claim_daily(
    _auth: BotAuth,
    State(state): State<LedgerState>,
    Path(guild_id): Path<String>,
    ValidatedJson(body): ValidatedJson<ClaimDailyRequest>,
) -> Result<Json<DailyClaimResult>> {
    let config = state
        .repos
        .configs
        .get_or_create(&guild_id, state.clock.now())
        .await?;
    let result = state
        .service
        .claim_daily(
            &guild_id,
            &body.user_id,
            &body.username,
            &config,
            &state.default_timezone,
        )
        .await?;
    Ok(Json(result))
}
