//! Squad CRUD and listing repository

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Squad;

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct SquadRepository {
    pool: PgPool,
}

impl SquadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, guild_id: &str) -> Result<Vec<Squad>> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, guild_id, role_id, name, description, welcome_message,
                   announcement_channel, switch_cost, max_members, is_active, is_default,
                   created_at, updated_at
            FROM squads
            WHERE guild_id = $1 AND is_active = true
            ORDER BY is_default ASC, name ASC
            "#,
        )
        .bind(guild_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, guild_id: &str, squad_id: Uuid) -> Result<Option<Squad>> {
        let row = sqlx::query_as(
            r#"
            SELECT id, guild_id, role_id, name, description, welcome_message,
                   announcement_channel, switch_cost, max_members, is_active, is_default,
                   created_at, updated_at
            FROM squads
            WHERE guild_id = $1 AND id = $2
            "#,
        )
        .bind(guild_id)
        .bind(squad_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn member_count(&self, squad_id: Uuid) -> Result<i64> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM squad_memberships WHERE squad_id = $1")
                .bind(squad_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        guild_id: &str,
        role_id: &str,
        name: &str,
        description: Option<&str>,
        welcome_message: Option<&str>,
        announcement_channel: Option<&str>,
        switch_cost: i64,
        max_members: Option<i32>,
        is_default: bool,
        now: DateTime<Utc>,
    ) -> Result<Squad> {
        if is_default {
            // Force any previous default off before creating a new one.
            sqlx::query("UPDATE squads SET is_default = false WHERE guild_id = $1 AND is_default = true")
                .bind(guild_id)
                .execute(&self.pool)
                .await?;
        }
        let created = sqlx::query_as(
            r#"
            INSERT INTO squads
                (id, guild_id, role_id, name, description, welcome_message,
                 announcement_channel, switch_cost, max_members, is_active, is_default,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, true, $10, $11, $11)
            RETURNING id, guild_id, role_id, name, description, welcome_message,
                      announcement_channel, switch_cost, max_members, is_active, is_default,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(guild_id)
        .bind(role_id)
        .bind(name)
        .bind(description)
        .bind(welcome_message)
        .bind(announcement_channel)
        .bind(if is_default { 0 } else { switch_cost })
        .bind(max_members)
        .bind(is_default)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        guild_id: &str,
        squad_id: Uuid,
        name: Option<&str>,
        description: Option<Option<&str>>,
        switch_cost: Option<i64>,
        max_members: Option<Option<i32>>,
        is_active: Option<bool>,
        now: DateTime<Utc>,
    ) -> Result<Squad> {
        let updated: Option<Squad> = sqlx::query_as(
            r#"
            UPDATE squads SET
                name = COALESCE($3, name),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                switch_cost = CASE WHEN is_default THEN 0 ELSE COALESCE($6, switch_cost) END,
                max_members = CASE WHEN $7 THEN $8 ELSE max_members END,
                is_active = COALESCE($9, is_active),
                updated_at = $10
            WHERE guild_id = $1 AND id = $2
            RETURNING id, guild_id, role_id, name, description, welcome_message,
                      announcement_channel, switch_cost, max_members, is_active, is_default,
                      created_at, updated_at
            "#,
        )
        .bind(guild_id)
        .bind(squad_id)
        .bind(name)
        .bind(description.is_some())
        .bind(description.flatten())
        .bind(switch_cost)
        .bind(max_members.is_some())
        .bind(max_members.flatten())
        .bind(is_active)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        updated.ok_or(RepositoryError::NotFound)
    }

    pub async fn delete(&self, guild_id: &str, squad_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM squads WHERE guild_id = $1 AND id = $2")
            .bind(guild_id)
            .bind(squad_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
