//! Transactional free functions for the Activity domain (Zero2Prod pattern).
//!
//! Other domains append activity rows as part of their own transaction —
//! the write must commit or roll back together with the mutation that
//! caused it, never as a separate commit.

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::SquadActivity;

/// Append an activity row within an existing transaction.
pub async fn append_activity_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
    squad_id: Option<Uuid>,
    activity_type: &str,
    metadata: Value,
    now: DateTime<Utc>,
) -> std::result::Result<SquadActivity, RepositoryError> {
    let created = sqlx::query_as(
        r#"
        INSERT INTO squad_activities (id, guild_id, user_id, squad_id, activity_type, metadata, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, guild_id, user_id, squad_id, activity_type, metadata, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(guild_id)
    .bind(user_id)
    .bind(squad_id)
    .bind(activity_type)
    .bind(metadata)
    .bind(now)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}
