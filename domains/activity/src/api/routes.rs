//! Route definitions for the Activity domain API

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create, health, list, stats};
use super::state::ActivityState;

fn create_routes() -> Router<ActivityState> {
    Router::new()
        .route("/squads/activities", post(create::create_activity))
        .route("/squads/activities/bulk", post(create::create_activities_bulk))
}

fn guild_list_routes() -> Router<ActivityState> {
    Router::new().route("/guilds/{gid}/activities", get(list::list_guild_activities))
}

fn squad_list_routes() -> Router<ActivityState> {
    Router::new().route("/squads/{sid}/activities", get(list::list_squad_activities))
}

fn health_routes() -> Router<ActivityState> {
    Router::new()
        .route("/squads/{sid}/health/score", get(health::health_score))
        .route("/squads/{sid}/health/engagement", get(health::engagement_score))
        .route("/squads/{sid}/health/report", get(health::health_report))
        .route("/squads/{sid}/health/trends", get(health::trends))
        .route("/squads/{sid}/health/patterns", get(health::patterns))
}

fn stats_routes() -> Router<ActivityState> {
    Router::new()
        .route("/guilds/{gid}/activities/stats", get(stats::stats))
        .route("/guilds/{gid}/activities/count", get(stats::count))
        .route("/guilds/{gid}/activities/recent", get(stats::recent))
}

/// Create all Activity domain API routes.
pub fn routes() -> Router<ActivityState> {
    Router::new()
        .merge(create_routes())
        .merge(guild_list_routes())
        .merge(squad_list_routes())
        .merge(health_routes())
        .merge(stats_routes())
}
