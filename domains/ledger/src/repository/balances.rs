//! Balance repository

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{BytesBalance, SYSTEM_ID, WELCOME_BONUS_REASON};

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct BalanceRepository {
    pool: PgPool,
}

impl BalanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user's balance, or `None` if no row exists yet.
    pub async fn get(&self, guild_id: &str, user_id: &str) -> Result<Option<BytesBalance>> {
        let row: Option<BytesBalance> = sqlx::query_as(
            r#"
            SELECT guild_id, user_id, balance, total_received, total_sent,
                   streak_count, last_daily_date, last_transfer_at, created_at, updated_at
            FROM bytes_balances
            WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get a user's balance, creating it (with the guild's starting
    /// balance, funded from SYSTEM) if it doesn't exist yet.
    pub async fn get_or_create(
        &self,
        guild_id: &str,
        user_id: &str,
        starting_balance: i64,
        now: DateTime<Utc>,
    ) -> Result<BytesBalance> {
        if let Some(existing) = self.get(guild_id, user_id).await? {
            return Ok(existing);
        }

        let mut tx = self.pool.begin().await?;

        let created: BytesBalance = sqlx::query_as(
            r#"
            INSERT INTO bytes_balances
                (guild_id, user_id, balance, total_received, total_sent,
                 streak_count, last_daily_date, last_transfer_at, created_at, updated_at)
            VALUES ($1, $2, $3, $3, 0, 0, NULL, NULL, $4, $4)
            ON CONFLICT (guild_id, user_id) DO UPDATE SET guild_id = EXCLUDED.guild_id
            RETURNING guild_id, user_id, balance, total_received, total_sent,
                      streak_count, last_daily_date, last_transfer_at, created_at, updated_at
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .bind(starting_balance)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        if starting_balance > 0 {
            sqlx::query(
                r#"
                INSERT INTO bytes_transactions
                    (id, guild_id, giver_id, giver_username, receiver_id, receiver_username, amount, reason, created_at)
                VALUES (gen_random_uuid(), $1, $2, $2, $3, $3, $4, $5, $6)
                "#,
            )
            .bind(guild_id)
            .bind(SYSTEM_ID)
            .bind(user_id)
            .bind(starting_balance)
            .bind(WELCOME_BONUS_REASON)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Leaderboard ordered by balance, descending.
    pub async fn leaderboard(
        &self,
        guild_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<crate::domain::entities::LeaderboardEntry>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                RANK() OVER (ORDER BY balance DESC) AS rank,
                user_id,
                balance,
                total_received
            FROM bytes_balances
            WHERE guild_id = $1
            ORDER BY balance DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(guild_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
