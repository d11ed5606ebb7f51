//! `POST /guilds/{gid}/bytes/transfer`

use axum::extract::{Path, State};
use axum::Json;
use bytes_auth::BotAuth;
use bytes_common::{Result, ValidatedJson};
use serde::Deserialize;
use validator::Validate;

use crate::api::state::LedgerState;
use crate::domain::entities::{Counterparty, TransferResult};

#[derive(Debug, Deserialize, Validate)]
pub struct TransferRequest {
    #[validate(length(min = 1))]
    pub giver_id: String,
    #[validate(length(min = 1))]
    pub giver_username: String,
    #[validate(length(min = 1))]
    pub receiver_id: String,
    #[validate(length(min = 1))]
    pub receiver_username: String,
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(length(max = 200))]
    pub reason: Option<String>,
}

pub async fn transfer(
    _auth: BotAuth,
    State(state): State<LedgerState>,
    Path(guild_id): Path<String>,
    ValidatedJson(body): ValidatedJson<TransferRequest>,
) -> Result<Json<TransferResult>> {
    let config = state
        .repos
        .configs
        .get_or_create(&guild_id, state.clock.now())
        .await?;

    let giver = Counterparty::User(body.giver_id.clone());
    let receiver = Counterparty::User(body.receiver_id.clone());

    let result = state
        .service
        .transfer(
            &guild_id,
            &giver,
            &body.giver_username,
            &receiver,
            &body.receiver_username,
            body.amount,
            body.reason.as_deref(),
            &config,
        )
        .await?;

    Ok(Json(result))
}
