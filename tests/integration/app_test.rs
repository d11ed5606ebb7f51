//! Composition root: the plain `/health` liveness route and the top-level
//! `/auth/*` introspection routes built in `bytes-app`, exercised through
//! `create_app` exactly as `bin/local.rs` wires them.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use bytes_common::Config;
use serde_json::Value;
use tower::ServiceExt;

use common::{test_database_url, ADMIN_API_KEY, BOT_API_KEY};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_config() -> Config {
    Config {
        database_url: test_database_url(),
        bot_api_key: BOT_API_KEY.to_string(),
        admin_api_key: ADMIN_API_KEY.to_string(),
        guild_default_timezone: "America/New_York".to_string(),
        log_level: "info".to_string(),
        rust_log: "bytes_core=debug".to_string(),
        port: 8000,
        webhook_timeout_ms: 3000,
    }
}

#[tokio::test]
#[serial_test::serial]
async fn health_route_is_reachable_without_authentication() {
    let pool = sqlx::PgPool::connect(&test_database_url()).await.unwrap();
    let app = bytes_app::create_app(test_config(), pool).await.unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[serial_test::serial]
async fn auth_validate_accepts_either_bot_or_admin_key_and_rejects_none() {
    let pool = sqlx::PgPool::connect(&test_database_url()).await.unwrap();
    let app = bytes_app::create_app(test_config(), pool).await.unwrap();

    let with_bot_key = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/validate")
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(with_bot_key).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["valid"], true);

    let unauthenticated = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/validate")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(unauthenticated).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial_test::serial]
async fn auth_status_reports_which_key_tier_authenticated() {
    let pool = sqlx::PgPool::connect(&test_database_url()).await.unwrap();
    let app = bytes_app::create_app(test_config(), pool).await.unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/status")
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["key_name"], "admin");
    assert_eq!(status["authenticated"], true);
}

#[tokio::test]
#[serial_test::serial]
async fn auth_health_reports_a_live_database_probe() {
    let pool = sqlx::PgPool::connect(&test_database_url()).await.unwrap();
    let app = bytes_app::create_app(test_config(), pool).await.unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["database"], true);
    assert_eq!(health["status"], "ok");
}
