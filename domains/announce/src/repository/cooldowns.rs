//! Beacon cooldown repository.
//!
//! Persisted in the database rather than an in-process map: spec's
//! redesign note for Announce calls out that per-process in-memory
//! cooldowns reset on restart, so this lives in `beacon_cooldowns` keyed
//! by `(guild_id, user_id)` instead.

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct CooldownRepository {
    pool: PgPool,
}

impl CooldownRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn last_beacon_at(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        let row: Option<(DateTime<Utc>,)> = sqlx::query_as(
            "SELECT last_beacon_at FROM beacon_cooldowns WHERE guild_id = $1 AND user_id = $2",
        )
        .bind(guild_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(at,)| at))
    }

    pub async fn set_last_beacon_at(
        &self,
        guild_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO beacon_cooldowns (guild_id, user_id, last_beacon_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (guild_id, user_id)
            DO UPDATE SET last_beacon_at = EXCLUDED.last_beacon_at
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
