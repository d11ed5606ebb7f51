//! Activity business logic: recording, listing, and cached health/engagement
//! analytics over a squad's recent activity window.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Duration, Utc};
use moka::sync::Cache;
use serde_json::Value;
use uuid::Uuid;

use super::entities::SquadActivity;
use super::health::{self, DailyPattern, PatternKind, Trends, WeeklyPattern};
use crate::repository::ActivityRepositories;

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthReport {
    pub health_score: f64,
    pub engagement_score: f64,
    pub activity_summary: ActivitySummary,
    pub trends: Trends,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ActivitySummary {
    pub total_activities: usize,
    pub unique_users: usize,
    pub most_recent: Option<SquadActivity>,
}

fn summarize(activities: &[SquadActivity]) -> ActivitySummary {
    let unique_users: std::collections::HashSet<&str> =
        activities.iter().map(|a| a.user_id.as_str()).collect();
    let most_recent = activities.iter().max_by_key(|a| a.created_at).cloned();
    ActivitySummary {
        total_activities: activities.len(),
        unique_users: unique_users.len(),
        most_recent,
    }
}

fn recommendations_for(score: f64) -> Vec<String> {
    let tier: &[&str] = if score >= 0.8 {
        &[
            "Excellent squad health! Continue current engagement strategies.",
            "Keep encouraging diverse member participation.",
        ]
    } else if score >= 0.6 {
        &[
            "Good squad health with room for optimization.",
            "Focus on increasing member diversity and participation.",
        ]
    } else if score >= 0.4 {
        &[
            "Squad health needs attention and improvement.",
            "Increase activity frequency through member incentives.",
        ]
    } else {
        &[
            "Urgent action required to improve squad health.",
            "Investigate and address underlying causes of low engagement.",
        ]
    };
    tier.iter().map(|s| s.to_string()).collect()
}

/// A cached analytics value, keyed by `(squad_id, window_days, kind)`.
#[derive(Clone)]
struct CacheKey {
    squad_id: Uuid,
    window_days: i64,
    kind: &'static str,
}

impl std::hash::Hash for CacheKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.squad_id.hash(state);
        self.window_days.hash(state);
        self.kind.hash(state);
    }
}
impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.squad_id == other.squad_id
            && self.window_days == other.window_days
            && self.kind == other.kind
    }
}
impl Eq for CacheKey {}

#[derive(Clone)]
pub struct ActivityService {
    pub repos: ActivityRepositories,
    cache: Cache<CacheKey, Value>,
}

impl ActivityService {
    pub fn new(repos: ActivityRepositories) -> Self {
        let cache = Cache::builder()
            .time_to_live(StdDuration::from_secs(5 * 60))
            .max_capacity(10_000)
            .build();
        Self { repos, cache }
    }

    pub async fn record(
        &self,
        guild_id: &str,
        user_id: &str,
        squad_id: Option<Uuid>,
        activity_type: &str,
        metadata: Value,
        now: DateTime<Utc>,
    ) -> Result<SquadActivity> {
        let created = self
            .repos
            .activities
            .insert(guild_id, user_id, squad_id, activity_type, metadata, now)
            .await?;
        if let Some(squad_id) = squad_id {
            self.invalidate(squad_id);
        }
        Ok(created)
    }

    pub async fn record_bulk(&self, rows: &[SquadActivity]) -> Result<Vec<SquadActivity>> {
        let created = self.repos.activities.bulk_insert(rows).await?;
        for squad_id in created.iter().filter_map(|a| a.squad_id) {
            self.invalidate(squad_id);
        }
        Ok(created)
    }

    pub async fn list(
        &self,
        guild_id: &str,
        activity_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SquadActivity>> {
        self.repos
            .activities
            .list(guild_id, activity_type, limit, offset)
            .await
    }

    pub async fn count(&self, guild_id: &str, activity_type: Option<&str>) -> Result<i64> {
        self.repos.activities.count(guild_id, activity_type).await
    }

    /// Invalidate every cached analytics entry for a squad across the
    /// windows/kinds this service computes. A mutation touching a squad
    /// calls this so stale scores never outlive their causing write.
    pub fn invalidate(&self, squad_id: Uuid) {
        for window_days in [7, 30] {
            for kind in ["health", "engagement", "trends", "daily", "weekly"] {
                self.cache.invalidate(&CacheKey {
                    squad_id,
                    window_days,
                    kind,
                });
            }
        }
    }

    pub async fn window(&self, squad_id: Uuid, days: i64, now: DateTime<Utc>) -> Result<Vec<SquadActivity>> {
        let since = now - Duration::days(days);
        self.repos.activities.window_for_squad(squad_id, since).await
    }

    pub async fn health_score(&self, squad_id: Uuid, days: i64, now: DateTime<Utc>) -> Result<f64> {
        let key = CacheKey {
            squad_id,
            window_days: days,
            kind: "health",
        };
        if let Some(cached) = self.cache.get(&key) {
            if let Some(v) = cached.as_f64() {
                return Ok(v);
            }
        }
        let activities = self.window(squad_id, days, now).await?;
        let score = health::health_score(&activities, days);
        self.cache.insert(key, serde_json::json!(score));
        Ok(score)
    }

    pub async fn engagement_score(&self, squad_id: Uuid, days: i64, now: DateTime<Utc>) -> Result<f64> {
        let key = CacheKey {
            squad_id,
            window_days: days,
            kind: "engagement",
        };
        if let Some(cached) = self.cache.get(&key) {
            if let Some(v) = cached.as_f64() {
                return Ok(v);
            }
        }
        let activities = self.window(squad_id, days, now).await?;
        let score = health::engagement_score(&activities, days, now);
        self.cache.insert(key, serde_json::json!(score));
        Ok(score)
    }

    pub async fn trends(&self, squad_id: Uuid, days: i64, now: DateTime<Utc>) -> Result<Trends> {
        let activities = self.window(squad_id, days, now).await?;
        Ok(health::trends(&activities))
    }

    pub async fn daily_pattern(&self, squad_id: Uuid, now: DateTime<Utc>) -> Result<DailyPattern> {
        let activities = self.window(squad_id, 30, now).await?;
        Ok(health::daily_pattern(&activities))
    }

    pub async fn weekly_pattern(&self, squad_id: Uuid, now: DateTime<Utc>) -> Result<WeeklyPattern> {
        let activities = self.window(squad_id, 30, now).await?;
        Ok(health::weekly_pattern(&activities))
    }

    pub async fn patterns_for(
        &self,
        squad_id: Uuid,
        kind: PatternKind,
        now: DateTime<Utc>,
    ) -> Result<Value> {
        match kind {
            PatternKind::Daily => Ok(serde_json::to_value(self.daily_pattern(squad_id, now).await?).unwrap()),
            PatternKind::Weekly => Ok(serde_json::to_value(self.weekly_pattern(squad_id, now).await?).unwrap()),
        }
    }

    pub async fn health_report(&self, squad_id: Uuid, now: DateTime<Utc>) -> Result<HealthReport> {
        let health = self.health_score(squad_id, 30, now).await?;
        let engagement = self.engagement_score(squad_id, 7, now).await?;
        let recent = self.window(squad_id, 30, now).await?;
        Ok(HealthReport {
            health_score: health,
            engagement_score: engagement,
            activity_summary: summarize(&recent),
            trends: health::trends(&recent),
            recommendations: recommendations_for(health),
        })
    }
}
