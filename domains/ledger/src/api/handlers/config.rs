//! `GET/PUT /guilds/{gid}/bytes/config`

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::{AdminAuth, AnyAuth};
use bytes_common::{Error, Result, ValidatedJson};
use serde::Deserialize;
use validator::Validate;

use crate::api::state::LedgerState;
use crate::domain::config::{validate_streak_bonuses, GuildConfig};

pub async fn get_config(
    _auth: AnyAuth,
    State(state): State<LedgerState>,
    Path(guild_id): Path<String>,
) -> Result<Json<GuildConfig>> {
    let config = state
        .repos
        .configs
        .get_or_create(&guild_id, state.clock.now())
        .await?;
    Ok(Json(config))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateConfigRequest {
    #[validate(range(min = 0))]
    pub starting_balance: Option<i64>,
    #[validate(range(min = 1))]
    pub daily_amount: Option<i64>,
    #[validate(range(min = 1))]
    pub max_transfer: Option<i64>,
    #[validate(range(min = 0, max = 72))]
    pub transfer_cooldown_hours: Option<i32>,
    pub streak_bonuses: Option<BTreeMap<i32, i32>>,
    pub role_rewards: Option<BTreeMap<String, i64>>,
    #[validate(range(min = 1))]
    pub beacon_message_limit: Option<i32>,
    pub campaign_active: Option<bool>,
}

pub async fn update_config(
    _auth: AdminAuth,
    State(state): State<LedgerState>,
    Path(guild_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateConfigRequest>,
) -> Result<Json<GuildConfig>> {
    if let Some(bonuses) = &body.streak_bonuses {
        validate_streak_bonuses(bonuses).map_err(Error::Validation)?;
    }

    let updated = state
        .repos
        .configs
        .update(
            &guild_id,
            body.starting_balance,
            body.daily_amount,
            body.max_transfer,
            body.transfer_cooldown_hours,
            body.streak_bonuses,
            body.role_rewards,
            body.beacon_message_limit,
            body.campaign_active,
            state.clock.now(),
        )
        .await?;

    Ok(Json(updated))
}
