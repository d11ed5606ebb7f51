//! Per-guild economy configuration.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-guild economy settings. Created lazily with defaults on first read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildConfig {
    pub guild_id: String,
    pub starting_balance: i64,
    pub daily_amount: i64,
    pub max_transfer: i64,
    pub transfer_cooldown_hours: i32,
    /// Streak length (days) -> multiplier applied to `daily_amount`.
    /// Kept sorted so the tier lookup can walk it in order.
    pub streak_bonuses: BTreeMap<i32, i32>,
    /// Discord role id -> bytes balance required to earn it automatically.
    pub role_rewards: BTreeMap<String, i64>,
    /// Max beacon body length, leaving room for an appended role mention.
    pub beacon_message_limit: i32,
    /// When true, the squads domain refuses non-default-squad switches for
    /// this guild (a challenge campaign is in progress).
    pub campaign_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_STARTING_BALANCE: i64 = 100;
pub const DEFAULT_DAILY_AMOUNT: i64 = 10;
pub const DEFAULT_MAX_TRANSFER: i64 = 1000;
pub const DEFAULT_TRANSFER_COOLDOWN_HOURS: i32 = 0;
pub const DEFAULT_BEACON_MESSAGE_LIMIT: i32 = 1800;
pub const DEFAULT_CAMPAIGN_ACTIVE: bool = false;

fn default_streak_bonuses() -> BTreeMap<i32, i32> {
    BTreeMap::from([(8, 2), (16, 4), (32, 8), (64, 16)])
}

impl GuildConfig {
    /// A freshly-defaulted config for a guild with no stored row yet.
    pub fn defaults(guild_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        GuildConfig {
            guild_id: guild_id.into(),
            starting_balance: DEFAULT_STARTING_BALANCE,
            daily_amount: DEFAULT_DAILY_AMOUNT,
            max_transfer: DEFAULT_MAX_TRANSFER,
            transfer_cooldown_hours: DEFAULT_TRANSFER_COOLDOWN_HOURS,
            streak_bonuses: default_streak_bonuses(),
            role_rewards: BTreeMap::new(),
            beacon_message_limit: DEFAULT_BEACON_MESSAGE_LIMIT,
            campaign_active: DEFAULT_CAMPAIGN_ACTIVE,
            created_at: now,
            updated_at: now,
        }
    }

    /// The multiplier in effect for a streak of this length: the largest
    /// configured tier key that is `<= streak_count`, or 1 if the streak
    /// hasn't reached the first tier.
    pub fn multiplier_for_streak(&self, streak_count: i32) -> i32 {
        self.streak_bonuses
            .range(..=streak_count)
            .next_back()
            .map(|(_, mult)| *mult)
            .unwrap_or(1)
    }
}

/// Validates a proposed streak-bonus map before it's persisted: every key
/// and value must be a positive integer.
pub fn validate_streak_bonuses(bonuses: &BTreeMap<i32, i32>) -> Result<(), String> {
    for (&day, &multiplier) in bonuses {
        if day <= 0 {
            return Err(format!("streak bonus day must be positive, got {day}"));
        }
        if multiplier <= 0 {
            return Err(format!(
                "streak bonus multiplier must be positive, got {multiplier}"
            ));
        }
    }
    Ok(())
}
