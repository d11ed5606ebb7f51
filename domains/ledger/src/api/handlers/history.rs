//! `GET /guilds/{gid}/bytes/transactions`

use axum::extract::{Path, Query, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;
use serde::Deserialize;

use crate::api::state::LedgerState;
use crate::domain::entities::BytesTransaction;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_transactions(
    _auth: AnyAuth,
    State(state): State<LedgerState>,
    Path(guild_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<BytesTransaction>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 100);
    let transactions = state
        .repos
        .transactions
        .history(&guild_id, query.user_id.as_deref(), limit, 0)
        .await?;
    Ok(Json(transactions))
}
