//! Squads domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Squad {
    pub id: Uuid,
    pub guild_id: String,
    pub role_id: String,
    pub name: String,
    pub description: Option<String>,
    pub welcome_message: Option<String>,
    pub announcement_channel: Option<String>,
    /// Base price for both joining and switching into this squad; `list_squads`
    /// derives `current_join_cost`/`current_switch_cost` from this base plus
    /// whichever sale kind is currently active, per spec.md §4.3.
    pub switch_cost: i64,
    pub max_members: Option<i32>,
    pub is_active: bool,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SquadMembership {
    pub guild_id: String,
    pub user_id: String,
    pub squad_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum SaleKind {
    Join,
    Switch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SquadSale {
    pub id: Uuid,
    pub squad_id: Uuid,
    pub kind: SaleKind,
    pub discount_percent: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl SquadSale {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at && now <= self.ends_at
    }
}

/// A squad with its currently-effective prices after applying any active
/// sale for this guild.
#[derive(Debug, Clone, Serialize)]
pub struct SquadListing {
    pub squad: Squad,
    pub current_join_cost: i64,
    pub current_switch_cost: i64,
    pub member_count: i64,
}

/// Response for `get_user_squad`.
#[derive(Debug, Clone, Serialize)]
pub struct UserSquadResponse {
    pub squad: Option<Squad>,
    pub joined_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinResult {
    pub new_balance: i64,
    pub squad: Squad,
    pub previous_squad: Option<Squad>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SquadMemberEntry {
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
}

/// Apply an active sale's discount to a base price, rounding down.
pub fn apply_discount(base_price: i64, discount_percent: i32) -> i64 {
    let discount_percent = discount_percent.clamp(0, 100) as i64;
    base_price - (base_price * discount_percent / 100)
}
