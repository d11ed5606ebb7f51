pub mod entities;
pub mod health;
pub mod service;

pub use entities::{is_negative, is_positive, SquadActivity};
pub use health::{
    activity_quality_score, daily_pattern, engagement_score, health_score, trends, weekly_pattern,
    DailyPattern, PatternKind, Trends, TrendDirection, WeeklyPattern,
};
pub use service::ActivityService;
