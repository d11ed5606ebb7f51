//! Domain entities for the Ledger domain.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved counterparty identifier for non-peer transactions. Retained as
/// the literal stored in `bytes_transactions.giver_id`/`receiver_id` for
/// compatibility with the historical audit-log format, but never compared
/// against or constructed ad hoc outside this module — every other
/// component deals in the typed `Counterparty` below.
pub const SYSTEM_ID: &str = "SYSTEM";

/// Who is on one side of a transaction: a real user, or the reserved
/// SYSTEM sentinel (welcome bonus, daily reward, squad fee, admin
/// adjustment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterparty {
    User(String),
    System,
}

impl Counterparty {
    pub fn id(&self) -> &str {
        match self {
            Counterparty::User(id) => id,
            Counterparty::System => SYSTEM_ID,
        }
    }

    pub fn username(&self) -> String {
        match self {
            Counterparty::User(id) => id.clone(),
            Counterparty::System => SYSTEM_ID.to_string(),
        }
    }
}

/// One row per (guild_id, user_id): a user's bytes balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BytesBalance {
    pub guild_id: String,
    pub user_id: String,
    pub balance: i64,
    pub total_received: i64,
    pub total_sent: i64,
    pub streak_count: i32,
    pub last_daily_date: Option<NaiveDate>,
    pub last_transfer_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only audit log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BytesTransaction {
    pub id: Uuid,
    pub guild_id: String,
    pub giver_id: String,
    pub giver_username: String,
    pub receiver_id: String,
    pub receiver_username: String,
    pub amount: i64,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful `claim_daily` call.
#[derive(Debug, Clone, Serialize)]
pub struct DailyClaimResult {
    pub earned: i64,
    pub multiplier: i32,
    pub streak_count: i32,
    pub new_balance: i64,
    pub reason: String,
}

/// Result of a successful `transfer` call.
#[derive(Debug, Clone, Serialize)]
pub struct TransferResult {
    pub giver_balance: i64,
    pub receiver_balance: i64,
    pub amount: i64,
    pub transaction: BytesTransaction,
}

/// A single entry in the leaderboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: String,
    pub balance: i64,
    pub total_received: i64,
}

/// Idempotency record for a role reward the user has crossed the
/// threshold for. The gateway polls for rows with `acked_at IS NULL`,
/// applies the Discord role, then acknowledges.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RoleRewardGrant {
    pub id: Uuid,
    pub guild_id: String,
    pub user_id: String,
    pub role_id: String,
    pub granted_at: DateTime<Utc>,
    pub acked_at: Option<DateTime<Utc>>,
}

/// Build the standard welcome-bonus / daily-reward reason string for a
/// given day count and multiplier, matching spec.md's exact phrasing.
pub fn daily_reward_reason(day: i32, multiplier: i32) -> String {
    if multiplier > 1 {
        format!("Daily reward (Day {day}, {multiplier}x multiplier)")
    } else {
        format!("Daily reward (Day {day})")
    }
}

pub const WELCOME_BONUS_REASON: &str = "New member welcome bonus";
