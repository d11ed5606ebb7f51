//! `GET /squads/{sid}/health/{score,engagement,report,trends,patterns}`

use axum::extract::{Path, Query, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::ActivityState;
use crate::domain::service::HealthReport;
use crate::domain::{PatternKind, Trends};

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: f64,
}

pub async fn health_score(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(squad_id): Path<Uuid>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ScoreResponse>> {
    let days = query.days.unwrap_or(30).clamp(1, 365);
    let score = state
        .service
        .health_score(squad_id, days, state.clock.now())
        .await?;
    Ok(Json(ScoreResponse { score }))
}

pub async fn engagement_score(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(squad_id): Path<Uuid>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ScoreResponse>> {
    let days = query.days.unwrap_or(7).clamp(1, 365);
    let score = state
        .service
        .engagement_score(squad_id, days, state.clock.now())
        .await?;
    Ok(Json(ScoreResponse { score }))
}

pub async fn health_report(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(squad_id): Path<Uuid>,
) -> Result<Json<HealthReport>> {
    let report = state
        .service
        .health_report(squad_id, state.clock.now())
        .await?;
    Ok(Json(report))
}

pub async fn trends(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(squad_id): Path<Uuid>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Trends>> {
    let days = query.days.unwrap_or(30).clamp(1, 365);
    let trends = state
        .service
        .trends(squad_id, days, state.clock.now())
        .await?;
    Ok(Json(trends))
}

#[derive(Debug, Deserialize)]
pub struct PatternsQuery {
    pub kind: Option<String>,
}

pub async fn patterns(
    _auth: AnyAuth,
    State(state): State<ActivityState>,
    Path(squad_id): Path<Uuid>,
    Query(query): Query<PatternsQuery>,
) -> Result<Json<serde_json::Value>> {
    let kind = match query.kind.as_deref() {
        Some("weekly") => PatternKind::Weekly,
        _ => PatternKind::Daily,
    };
    let value = state
        .service
        .patterns_for(squad_id, kind, state.clock.now())
        .await?;
    Ok(Json(value))
}
