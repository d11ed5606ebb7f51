//! Pure health/engagement/trend/pattern calculations over a window of
//! activity rows. Kept free of any I/O so they're trivially unit-testable
//! and reusable from both the live repository path and the cache layer.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

use super::entities::{is_negative, is_positive, SquadActivity};

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn activity_frequency_score(activities: &[SquadActivity], days: i64) -> f64 {
    if activities.is_empty() || days <= 0 {
        return 0.0;
    }
    let per_day = activities.len() as f64 / days as f64;
    (per_day / 2.0).min(1.0)
}

fn member_diversity_score(activities: &[SquadActivity]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let unique: std::collections::HashSet<&str> =
        activities.iter().map(|a| a.user_id.as_str()).collect();
    (unique.len() as f64 / 5.0).min(1.0)
}

/// Ratio of positive to (positive + negative) activity types; 0.5 if none
/// of either type are present in the window.
pub fn activity_quality_score(activities: &[SquadActivity]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let positive = activities
        .iter()
        .filter(|a| is_positive(&a.activity_type))
        .count();
    let negative = activities
        .iter()
        .filter(|a| is_negative(&a.activity_type))
        .count();
    if positive + negative == 0 {
        return 0.5;
    }
    positive as f64 / (positive + negative) as f64
}

fn consistency_score(activities: &[SquadActivity], days: i64) -> f64 {
    if activities.is_empty() || days < 7 {
        return 0.0;
    }
    let mut daily_counts: HashMap<chrono::NaiveDate, i64> = HashMap::new();
    for activity in activities {
        *daily_counts.entry(activity.created_at.date_naive()).or_insert(0) += 1;
    }
    if daily_counts.len() < 2 {
        return 0.0;
    }
    let counts: Vec<f64> = daily_counts.values().map(|&c| c as f64).collect();
    let avg = mean(&counts);
    if avg == 0.0 {
        return 0.0;
    }
    let coefficient_of_variation = stdev(&counts) / avg;
    (1.0 - coefficient_of_variation.min(1.0)).max(0.0)
}

/// `health_score(squad, days=30)`: weighted combination of frequency,
/// member diversity, activity quality, and day-to-day consistency.
pub fn health_score(activities: &[SquadActivity], days: i64) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let score = activity_frequency_score(activities, days) * 0.30
        + member_diversity_score(activities) * 0.25
        + activity_quality_score(activities) * 0.25
        + consistency_score(activities, days) * 0.20;
    score.clamp(0.0, 1.0)
}

/// `engagement_score(squad, days=7)`: volume, diversity, recency, and
/// quality, evaluated against a shorter window than `health_score`.
pub fn engagement_score(activities: &[SquadActivity], days: i64, now: DateTime<Utc>) -> f64 {
    if activities.is_empty() || days <= 0 {
        return 0.0;
    }
    let volume_score = (activities.len() as f64 / (days as f64 * 5.0)).min(1.0);
    let diversity_score = member_diversity_score(activities);

    let window_hours = days as f64 * 24.0;
    let recency_scores: Vec<f64> = activities
        .iter()
        .map(|a| {
            let hours_ago = (now - a.created_at).num_seconds() as f64 / 3600.0;
            (1.0 - (hours_ago / window_hours)).max(0.0)
        })
        .collect();
    let avg_recency = mean(&recency_scores);

    let quality_score = activity_quality_score(activities);

    let score =
        volume_score * 0.30 + diversity_score * 0.30 + avg_recency * 0.20 + quality_score * 0.20;
    score.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trends {
    pub trend_direction: TrendDirection,
    pub growth_rate: f64,
    pub weekly_activity: HashMap<String, i64>,
    pub confidence: f64,
    pub total_activities: i64,
}

/// Splits the window into two halves by ISO week and compares average
/// weekly counts, the way `analyze_activity_trends` does upstream.
pub fn trends(activities: &[SquadActivity]) -> Trends {
    if activities.is_empty() {
        return Trends {
            trend_direction: TrendDirection::Stable,
            growth_rate: 0.0,
            weekly_activity: HashMap::new(),
            confidence: 0.0,
            total_activities: 0,
        };
    }

    let mut weekly: HashMap<String, i64> = HashMap::new();
    for activity in activities {
        let iso = activity.created_at.iso_week();
        let key = format!("{}-W{:02}", iso.year(), iso.week());
        *weekly.entry(key).or_insert(0) += 1;
    }

    let mut sorted_weeks: Vec<(&String, &i64)> = weekly.iter().collect();
    sorted_weeks.sort_by_key(|(k, _)| (*k).clone());

    if sorted_weeks.len() < 2 {
        return Trends {
            trend_direction: TrendDirection::Stable,
            growth_rate: 0.0,
            weekly_activity: weekly,
            confidence: 0.0,
            total_activities: activities.len() as i64,
        };
    }

    let week_values: Vec<f64> = sorted_weeks.iter().map(|(_, &c)| c as f64).collect();
    let mid = week_values.len() / 2;
    let first_half_avg = mean(&week_values[..mid]);
    let second_half_avg = mean(&week_values[mid..]);
    let growth_rate = (second_half_avg - first_half_avg) / first_half_avg.max(1.0);

    let trend_direction = if growth_rate > 0.1 {
        TrendDirection::Increasing
    } else if growth_rate < -0.1 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let variance = {
        let m = mean(&week_values);
        if week_values.len() > 1 {
            week_values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (week_values.len() - 1) as f64
        } else {
            0.0
        }
    };
    let week_mean = mean(&week_values).max(1.0);
    let confidence = (1.0 - variance / week_mean).clamp(0.0, 1.0);

    Trends {
        trend_direction,
        growth_rate,
        weekly_activity: weekly,
        confidence,
        total_activities: activities.len() as i64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternKind {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyPattern {
    pub hourly_distribution: HashMap<u32, i64>,
    pub activity_by_day: HashMap<String, i64>,
    pub peak_hours: Vec<u32>,
    pub most_active_hour: Option<u32>,
    pub total_active_days: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyPattern {
    pub daily_distribution: HashMap<String, i64>,
    pub weekday_count: i64,
    pub weekend_count: i64,
    pub weekday_percentage: f64,
    pub most_active_day: Option<String>,
    pub total_activities: i64,
}

pub fn daily_pattern(activities: &[SquadActivity]) -> DailyPattern {
    let mut hourly: HashMap<u32, i64> = HashMap::new();
    let mut by_day: HashMap<String, i64> = HashMap::new();
    for activity in activities {
        *hourly.entry(activity.created_at.hour()).or_insert(0) += 1;
        *by_day
            .entry(activity.created_at.format("%Y-%m-%d").to_string())
            .or_insert(0) += 1;
    }
    let mut sorted_hours: Vec<(u32, i64)> = hourly.iter().map(|(&h, &c)| (h, c)).collect();
    sorted_hours.sort_by(|a, b| b.1.cmp(&a.1));
    let peak_hours = sorted_hours.iter().take(3).map(|(h, _)| *h).collect();
    let most_active_hour = sorted_hours.first().map(|(h, _)| *h);

    DailyPattern {
        total_active_days: by_day.len(),
        hourly_distribution: hourly,
        activity_by_day: by_day,
        peak_hours,
        most_active_hour,
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn weekly_pattern(activities: &[SquadActivity]) -> WeeklyPattern {
    let mut by_weekday: HashMap<u32, i64> = HashMap::new();
    let mut weekday_count = 0i64;
    let mut weekend_count = 0i64;
    for activity in activities {
        let weekday = activity.created_at.weekday().num_days_from_monday();
        *by_weekday.entry(weekday).or_insert(0) += 1;
        if weekday >= 5 {
            weekend_count += 1;
        } else {
            weekday_count += 1;
        }
    }
    let daily_distribution = by_weekday
        .iter()
        .map(|(&d, &c)| (WEEKDAY_NAMES[d as usize].to_string(), c))
        .collect();
    let most_active_day = by_weekday
        .iter()
        .max_by_key(|(_, &c)| c)
        .map(|(&d, _)| WEEKDAY_NAMES[d as usize].to_string());
    let total = (weekday_count + weekend_count).max(1);

    WeeklyPattern {
        daily_distribution,
        weekday_count,
        weekend_count,
        weekday_percentage: (weekday_count as f64 / total as f64 * 100.0 * 10.0).round() / 10.0,
        most_active_day,
        total_activities: activities.len() as i64,
    }
}
