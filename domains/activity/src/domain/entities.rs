//! Activity domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only event describing a notable user/squad action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SquadActivity {
    pub id: Uuid,
    pub guild_id: String,
    pub user_id: String,
    pub squad_id: Option<Uuid>,
    pub activity_type: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Activity types counted as positive signal by the health-score quality
/// component.
pub const POSITIVE_ACTIVITY_TYPES: &[&str] = &[
    "squad_join",
    "message_sent",
    "event_participated",
    "role_assigned",
];

/// Activity types counted as negative signal by the health-score quality
/// component.
pub const NEGATIVE_ACTIVITY_TYPES: &[&str] = &["squad_leave", "user_timeout", "warning_issued"];

pub fn is_positive(activity_type: &str) -> bool {
    POSITIVE_ACTIVITY_TYPES.contains(&activity_type)
}

pub fn is_negative(activity_type: &str) -> bool {
    NEGATIVE_ACTIVITY_TYPES.contains(&activity_type)
}
