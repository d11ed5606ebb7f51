//! Role-reward grant tracking: idempotent "crossed a balance threshold"
//! records the chat gateway polls to apply the actual Discord role.

use std::collections::BTreeMap;

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::RoleRewardGrant;

/// Insert a grant row for every role-reward threshold `new_balance` has
/// reached, skipping thresholds already granted to this user
/// (`(guild_id, user_id, role_id)` unique constraint makes this safe
/// under concurrent credits). Returns the grants newly created.
pub async fn grant_crossed_thresholds_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
    new_balance: i64,
    role_rewards: &BTreeMap<String, i64>,
    now: DateTime<Utc>,
) -> std::result::Result<Vec<RoleRewardGrant>, RepositoryError> {
    let mut granted = Vec::new();
    for (role_id, threshold) in role_rewards {
        if new_balance < *threshold {
            continue;
        }
        let row: Option<RoleRewardGrant> = sqlx::query_as(
            r#"
            INSERT INTO role_reward_grants (id, guild_id, user_id, role_id, granted_at, acked_at)
            VALUES ($1, $2, $3, $4, $5, NULL)
            ON CONFLICT (guild_id, user_id, role_id) DO NOTHING
            RETURNING id, guild_id, user_id, role_id, granted_at, acked_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(guild_id)
        .bind(user_id)
        .bind(role_id)
        .bind(now)
        .fetch_optional(&mut **transaction)
        .await?;

        if let Some(grant) = row {
            granted.push(grant);
        }
    }
    Ok(granted)
}

#[derive(Clone)]
pub struct RoleRewardRepository {
    pool: PgPool,
}

impl RoleRewardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn pending(
        &self,
        guild_id: &str,
    ) -> std::result::Result<Vec<RoleRewardGrant>, RepositoryError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, guild_id, user_id, role_id, granted_at, acked_at
            FROM role_reward_grants
            WHERE guild_id = $1 AND acked_at IS NULL
            ORDER BY granted_at ASC
            "#,
        )
        .bind(guild_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn ack(
        &self,
        guild_id: &str,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> std::result::Result<RoleRewardGrant, RepositoryError> {
        let row: Option<RoleRewardGrant> = sqlx::query_as(
            r#"
            UPDATE role_reward_grants
            SET acked_at = $3
            WHERE guild_id = $1 AND id = $2 AND acked_at IS NULL
            RETURNING id, guild_id, user_id, role_id, granted_at, acked_at
            "#,
        )
        .bind(guild_id)
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(RepositoryError::NotFound)
    }
}
