//! Transactional free functions for the Ledger domain (Zero2Prod pattern).

use bytes_common::db::RepositoryError;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{BytesBalance, BytesTransaction};

/// Read-only queries against the audit log.
#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Transaction history for a guild, optionally filtered to one user
    /// (as either giver or receiver), newest first.
    pub async fn history(
        &self,
        guild_id: &str,
        user_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> std::result::Result<Vec<BytesTransaction>, RepositoryError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, guild_id, giver_id, giver_username, receiver_id, receiver_username, amount, reason, created_at
            FROM bytes_transactions
            WHERE guild_id = $1
              AND ($2::text IS NULL OR giver_id = $2 OR receiver_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Lock and fetch a balance row within an existing transaction.
pub async fn get_balance_for_update_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
) -> std::result::Result<Option<BytesBalance>, RepositoryError> {
    let row: Option<BytesBalance> = sqlx::query_as(
        r#"
        SELECT guild_id, user_id, balance, total_received, total_sent,
               streak_count, last_daily_date, last_transfer_at, created_at, updated_at
        FROM bytes_balances
        WHERE guild_id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .fetch_optional(&mut **transaction)
    .await?;
    Ok(row)
}

/// Append a row to the audit log within an existing transaction.
#[allow(clippy::too_many_arguments)]
pub async fn insert_transaction_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    giver_id: &str,
    giver_username: &str,
    receiver_id: &str,
    receiver_username: &str,
    amount: i64,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> std::result::Result<crate::domain::entities::BytesTransaction, RepositoryError> {
    let created = sqlx::query_as(
        r#"
        INSERT INTO bytes_transactions
            (id, guild_id, giver_id, giver_username, receiver_id, receiver_username, amount, reason, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, guild_id, giver_id, giver_username, receiver_id, receiver_username, amount, reason, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(guild_id)
    .bind(giver_id)
    .bind(giver_username)
    .bind(receiver_id)
    .bind(receiver_username)
    .bind(amount)
    .bind(reason)
    .bind(now)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Credit a balance (increment `balance` and `total_received`) within an
/// existing transaction. Creates the row with zero starting balance first
/// if it doesn't exist, so SYSTEM-funded credits never race a first read.
pub async fn credit_balance_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
    amount: i64,
    now: DateTime<Utc>,
) -> std::result::Result<BytesBalance, RepositoryError> {
    let updated = sqlx::query_as(
        r#"
        INSERT INTO bytes_balances
            (guild_id, user_id, balance, total_received, total_sent, streak_count,
             last_daily_date, last_transfer_at, created_at, updated_at)
        VALUES ($1, $2, $3, $3, 0, 0, NULL, NULL, $4, $4)
        ON CONFLICT (guild_id, user_id) DO UPDATE SET
            balance = bytes_balances.balance + $3,
            total_received = bytes_balances.total_received + $3,
            updated_at = $4
        RETURNING guild_id, user_id, balance, total_received, total_sent,
                  streak_count, last_daily_date, last_transfer_at, created_at, updated_at
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(amount)
    .bind(now)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(updated)
}

/// Debit a balance within an existing transaction. The caller must have
/// already verified sufficient funds (typically via a `FOR UPDATE` read);
/// this is a plain conditional update guarding against the race anyway.
pub async fn debit_balance_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
    amount: i64,
    now: DateTime<Utc>,
) -> std::result::Result<BytesBalance, RepositoryError> {
    let updated: Option<BytesBalance> = sqlx::query_as(
        r#"
        UPDATE bytes_balances
        SET balance = balance - $3,
            total_sent = total_sent + $3,
            updated_at = $4
        WHERE guild_id = $1 AND user_id = $2 AND balance >= $3
        RETURNING guild_id, user_id, balance, total_received, total_sent,
                  streak_count, last_daily_date, last_transfer_at, created_at, updated_at
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(amount)
    .bind(now)
    .fetch_optional(&mut **transaction)
    .await?;

    updated.ok_or(RepositoryError::InvalidData(
        "insufficient balance".to_string(),
    ))
}

/// Set a transfer-cooldown timestamp on the giver's balance row.
pub async fn set_last_transfer_at_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> std::result::Result<(), RepositoryError> {
    sqlx::query(
        r#"
        UPDATE bytes_balances
        SET last_transfer_at = $3, updated_at = $3
        WHERE guild_id = $1 AND user_id = $2
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(now)
    .execute(&mut **transaction)
    .await?;
    Ok(())
}

/// Compare-and-swap claim of the daily reward: succeeds only if the stored
/// `last_daily_date` is not already `today` (guild-local calendar date).
/// On success, returns the updated row with `streak_count` bumped: by 1 if
/// `today` is the day immediately after `last_daily_date`, otherwise reset
/// to 1. `rows_affected() == 0` (returned as `Ok(None)`) means the claim
/// had already happened today — the caller maps that to `AlreadyClaimed`.
pub async fn claim_daily_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
    today: NaiveDate,
    is_consecutive: bool,
    earned: i64,
    now: DateTime<Utc>,
) -> std::result::Result<Option<BytesBalance>, RepositoryError> {
    let updated: Option<BytesBalance> = sqlx::query_as(
        r#"
        UPDATE bytes_balances
        SET balance = balance + $4,
            total_received = total_received + $4,
            streak_count = CASE WHEN $5 THEN streak_count + 1 ELSE 1 END,
            last_daily_date = $3,
            updated_at = $6
        WHERE guild_id = $1 AND user_id = $2
          AND last_daily_date IS DISTINCT FROM $3
        RETURNING guild_id, user_id, balance, total_received, total_sent,
                  streak_count, last_daily_date, last_transfer_at, created_at, updated_at
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(today)
    .bind(earned)
    .bind(is_consecutive)
    .bind(now)
    .fetch_optional(&mut **transaction)
    .await?;
    Ok(updated)
}

/// Deterministic lock ordering for a dual-party transfer: always lock the
/// lexicographically smaller user id first, regardless of giver/receiver
/// roles, to avoid deadlocks between two users transferring to each other
/// concurrently.
pub fn lock_order<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
