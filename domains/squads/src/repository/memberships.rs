//! Squad membership repository (reads; mutations live in transactions.rs)

use bytes_common::db::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{SquadMemberEntry, SquadMembership};

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<SquadMembership>> {
        let row = sqlx::query_as(
            r#"
            SELECT guild_id, user_id, squad_id, joined_at
            FROM squad_memberships
            WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_for_squad(&self, squad_id: Uuid) -> Result<Vec<SquadMemberEntry>> {
        let rows = sqlx::query_as(
            r#"
            SELECT user_id, joined_at
            FROM squad_memberships
            WHERE squad_id = $1
            ORDER BY joined_at ASC
            "#,
        )
        .bind(squad_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
