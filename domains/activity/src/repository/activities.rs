//! Activity repository: append-only reads.

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::SquadActivity;

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        guild_id: &str,
        activity_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SquadActivity>> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, guild_id, user_id, squad_id, activity_type, metadata, created_at
            FROM squad_activities
            WHERE guild_id = $1 AND ($2::text IS NULL OR activity_type = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(guild_id)
        .bind(activity_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self, guild_id: &str, activity_type: Option<&str>) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM squad_activities
            WHERE guild_id = $1 AND ($2::text IS NULL OR activity_type = $2)
            "#,
        )
        .bind(guild_id)
        .bind(activity_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    /// All activity for a squad within the trailing `days` window, used as
    /// the raw input to health/engagement scoring.
    pub async fn window_for_squad(
        &self,
        squad_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<SquadActivity>> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, guild_id, user_id, squad_id, activity_type, metadata, created_at
            FROM squad_activities
            WHERE squad_id = $1 AND created_at >= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(squad_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Append a single activity row in its own transaction. Used by the
    /// public "create one activity" API route, where there's no wider
    /// mutation for it to ride along with.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        guild_id: &str,
        user_id: &str,
        squad_id: Option<Uuid>,
        activity_type: &str,
        metadata: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<SquadActivity> {
        let mut tx = self.pool.begin().await?;
        let created = crate::repository::append_activity_tx(
            &mut tx,
            guild_id,
            user_id,
            squad_id,
            activity_type,
            metadata,
            now,
        )
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    pub async fn bulk_insert(
        &self,
        rows: &[SquadActivity],
    ) -> Result<Vec<SquadActivity>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let inserted = crate::repository::append_activity_tx(
                &mut tx,
                &row.guild_id,
                &row.user_id,
                row.squad_id,
                &row.activity_type,
                row.metadata.clone(),
                row.created_at,
            )
            .await?;
            created.push(inserted);
        }
        tx.commit().await?;
        Ok(created)
    }
}
