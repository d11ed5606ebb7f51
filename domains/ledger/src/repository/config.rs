//! Guild economy config repository

use std::collections::BTreeMap;

use bytes_common::db::RepositoryError;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::config::GuildConfig;

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(sqlx::FromRow)]
struct GuildConfigRow {
    guild_id: String,
    starting_balance: i64,
    daily_amount: i64,
    max_transfer: i64,
    transfer_cooldown_hours: i32,
    streak_bonuses: serde_json::Value,
    role_rewards: serde_json::Value,
    beacon_message_limit: i32,
    campaign_active: bool,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

impl From<GuildConfigRow> for GuildConfig {
    fn from(row: GuildConfigRow) -> Self {
        GuildConfig {
            guild_id: row.guild_id,
            starting_balance: row.starting_balance,
            daily_amount: row.daily_amount,
            max_transfer: row.max_transfer,
            transfer_cooldown_hours: row.transfer_cooldown_hours,
            streak_bonuses: serde_json::from_value(row.streak_bonuses).unwrap_or_default(),
            role_rewards: serde_json::from_value(row.role_rewards).unwrap_or_default(),
            beacon_message_limit: row.beacon_message_limit,
            campaign_active: row.campaign_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct GuildConfigRepository {
    pool: PgPool,
}

impl GuildConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_or_create(&self, guild_id: &str, now: chrono::DateTime<Utc>) -> Result<GuildConfig> {
        let existing: Option<GuildConfigRow> = sqlx::query_as(
            r#"
            SELECT guild_id, starting_balance, daily_amount, max_transfer,
                   transfer_cooldown_hours, streak_bonuses, role_rewards,
                   beacon_message_limit, campaign_active, created_at, updated_at
            FROM guild_configs
            WHERE guild_id = $1
            "#,
        )
        .bind(guild_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = existing {
            return Ok(row.into());
        }

        let defaults = GuildConfig::defaults(guild_id, now);
        let created: GuildConfigRow = sqlx::query_as(
            r#"
            INSERT INTO guild_configs
                (guild_id, starting_balance, daily_amount, max_transfer,
                 transfer_cooldown_hours, streak_bonuses, role_rewards,
                 beacon_message_limit, campaign_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ON CONFLICT (guild_id) DO UPDATE SET guild_id = EXCLUDED.guild_id
            RETURNING guild_id, starting_balance, daily_amount, max_transfer,
                      transfer_cooldown_hours, streak_bonuses, role_rewards,
                      beacon_message_limit, campaign_active, created_at, updated_at
            "#,
        )
        .bind(&defaults.guild_id)
        .bind(defaults.starting_balance)
        .bind(defaults.daily_amount)
        .bind(defaults.max_transfer)
        .bind(defaults.transfer_cooldown_hours)
        .bind(serde_json::to_value(&defaults.streak_bonuses).unwrap())
        .bind(serde_json::to_value(&defaults.role_rewards).unwrap())
        .bind(defaults.beacon_message_limit)
        .bind(defaults.campaign_active)
        .bind(defaults.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created.into())
    }

    /// Lightweight read used by the squads domain's campaign gate: avoids the
    /// `get_or_create` write path, defaulting to `false` for guilds with no
    /// stored config yet.
    pub async fn campaign_active(&self, guild_id: &str) -> Result<bool> {
        let row: Option<(bool,)> =
            sqlx::query_as("SELECT campaign_active FROM guild_configs WHERE guild_id = $1")
                .bind(guild_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(active,)| active).unwrap_or(false))
    }

    /// Apply a partial update. `None` fields are left unchanged.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        guild_id: &str,
        starting_balance: Option<i64>,
        daily_amount: Option<i64>,
        max_transfer: Option<i64>,
        transfer_cooldown_hours: Option<i32>,
        streak_bonuses: Option<BTreeMap<i32, i32>>,
        role_rewards: Option<BTreeMap<String, i64>>,
        beacon_message_limit: Option<i32>,
        campaign_active: Option<bool>,
        now: chrono::DateTime<Utc>,
    ) -> Result<GuildConfig> {
        // Ensure a row exists first so the partial UPDATE below has a target.
        self.get_or_create(guild_id, now).await?;

        let updated: GuildConfigRow = sqlx::query_as(
            r#"
            UPDATE guild_configs SET
                starting_balance = COALESCE($2, starting_balance),
                daily_amount = COALESCE($3, daily_amount),
                max_transfer = COALESCE($4, max_transfer),
                transfer_cooldown_hours = COALESCE($5, transfer_cooldown_hours),
                streak_bonuses = COALESCE($6, streak_bonuses),
                role_rewards = COALESCE($7, role_rewards),
                beacon_message_limit = COALESCE($8, beacon_message_limit),
                campaign_active = COALESCE($9, campaign_active),
                updated_at = $10
            WHERE guild_id = $1
            RETURNING guild_id, starting_balance, daily_amount, max_transfer,
                      transfer_cooldown_hours, streak_bonuses, role_rewards,
                      beacon_message_limit, campaign_active, created_at, updated_at
            "#,
        )
        .bind(guild_id)
        .bind(starting_balance)
        .bind(daily_amount)
        .bind(max_transfer)
        .bind(transfer_cooldown_hours)
        .bind(streak_bonuses.map(|m| serde_json::to_value(m).unwrap()))
        .bind(role_rewards.map(|m| serde_json::to_value(m).unwrap()))
        .bind(beacon_message_limit)
        .bind(campaign_active)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated.into())
    }
}
