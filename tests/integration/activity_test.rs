//! Activity domain: appending activity rows (single and bulk), listing them
//! back, and reading a health score computed over the appended window.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{TestDb, ADMIN_API_KEY, BOT_API_KEY};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_squad(squads: axum::Router, guild_id: &str) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads"))
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "role_id": "role-activity",
                "name": "Activity Squad",
                "switch_cost": 0,
                "is_default": true,
            })
            .to_string(),
        ))
        .unwrap();
    let response = squads.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let squad = body_json(response).await;
    squad["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[serial_test::serial]
async fn appended_activity_is_visible_in_guild_and_squad_listings() {
    let db = TestDb::new().await.unwrap();
    let squads = db.squads_router();
    let activity = db.activity_router();
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let squad_id = create_squad(squads, &guild_id).await;

    let append = Request::builder()
        .method(Method::POST)
        .uri("/squads/activities")
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "guild_id": guild_id,
                "user_id": user_id,
                "squad_id": squad_id,
                "activity_type": "message_sent",
                "metadata": { "channel": "general" },
            })
            .to_string(),
        ))
        .unwrap();
    let response = activity.clone().oneshot(append).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/activities"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let list_response = activity.clone().oneshot(list).await.unwrap();
    assert_eq!(list_response.status(), StatusCode::OK);
    let rows = body_json(list_response).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["activity_type"], "message_sent");

    let squad_list = Request::builder()
        .method(Method::GET)
        .uri(format!("/squads/{squad_id}/activities"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let squad_list_response = activity.oneshot(squad_list).await.unwrap();
    assert_eq!(squad_list_response.status(), StatusCode::OK);
    let squad_rows = body_json(squad_list_response).await;
    assert_eq!(squad_rows.as_array().unwrap().len(), 1);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn bulk_append_rejects_an_empty_batch() {
    let db = TestDb::new().await.unwrap();
    let activity = db.activity_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/squads/activities/bulk")
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "activities": [] }).to_string()))
        .unwrap();
    let response = activity.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn health_score_reflects_a_squad_with_positive_activity() {
    let db = TestDb::new().await.unwrap();
    let squads = db.squads_router();
    let activity = db.activity_router();
    let guild_id = db.guild_id();

    let squad_id = create_squad(squads, &guild_id).await;

    let bulk = Request::builder()
        .method(Method::POST)
        .uri("/squads/activities/bulk")
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "activities": (0..5).map(|i| json!({
                    "guild_id": guild_id,
                    "user_id": format!("user-{i}"),
                    "squad_id": squad_id,
                    "activity_type": "message_sent",
                    "metadata": {},
                })).collect::<Vec<_>>(),
            })
            .to_string(),
        ))
        .unwrap();
    let bulk_response = activity.clone().oneshot(bulk).await.unwrap();
    assert_eq!(bulk_response.status(), StatusCode::OK);

    let score_request = Request::builder()
        .method(Method::GET)
        .uri(format!("/squads/{squad_id}/health/score"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let score_response = activity.oneshot(score_request).await.unwrap();
    assert_eq!(score_response.status(), StatusCode::OK);
    let score = body_json(score_response).await;
    let value = score["score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&value));
    assert!(value > 0.0);

    db.cleanup().await.unwrap();
}
