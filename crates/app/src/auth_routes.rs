//! Top-level auth-introspection routes: `/auth/validate`, `/auth/health`,
//! `/auth/status`. These sit outside any single domain, so they get their
//! own small state rather than living on one domain's `FromRef` state.

use axum::extract::{FromRef, State};
use axum::routing::get;
use axum::{Json, Router};
use bytes_auth::{AnyAuth, AuthConfig, Principal};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AuthRoutesState {
    pub auth: AuthConfig,
    pub pool: PgPool,
}

impl FromRef<AuthRoutesState> for AuthConfig {
    fn from_ref(state: &AuthRoutesState) -> Self {
        state.auth.clone()
    }
}

pub fn routes() -> Router<AuthRoutesState> {
    Router::new()
        .route("/auth/validate", get(validate))
        .route("/auth/health", get(health))
        .route("/auth/status", get(status))
}

async fn validate(_auth: AnyAuth) -> Json<serde_json::Value> {
    Json(json!({ "valid": true }))
}

async fn health(State(state): State<AuthRoutesState>) -> Json<serde_json::Value> {
    let database = sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .is_ok();

    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "database": database,
    }))
}

async fn status(auth: AnyAuth) -> Json<serde_json::Value> {
    let key_name = match auth.0 {
        Principal::Bot => "bot",
        Principal::Admin => "admin",
    };

    Json(json!({
        "authenticated": true,
        "key_name": key_name,
        "environment": std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        "api_version": "v1",
        "timestamp": Utc::now(),
    }))
}
