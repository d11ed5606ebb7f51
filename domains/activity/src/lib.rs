//! Activity domain: append-only event log plus health/engagement analytics.

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::{
    activity_quality_score, daily_pattern, engagement_score, health_score, is_negative,
    is_positive, trends, weekly_pattern, ActivityService, DailyPattern, PatternKind,
    SquadActivity, TrendDirection, Trends, WeeklyPattern,
};
pub use api::ActivityState;
pub use repository::{ActivityRepositories, ActivityRepository};
