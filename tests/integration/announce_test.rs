//! Announce domain: a beacon dispatches through the webhook port once, then
//! is rejected by the per-user cooldown until it elapses, and an
//! over-length body is rejected before ever reaching the port.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{RecordingWebhook, TestDb, BOT_API_KEY};

#[tokio::test]
#[serial_test::serial]
async fn beacon_sends_once_then_is_cooled_down() {
    let db = TestDb::new().await.unwrap();
    let webhook = RecordingWebhook::new();
    let router = db.announce_router(webhook.clone());
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let send = |router: axum::Router| {
        let guild_id = guild_id.clone();
        let user_id = user_id.clone();
        async move {
            let request = Request::builder()
                .method(Method::POST)
                .uri(format!("/guilds/{guild_id}/beacon"))
                .header("authorization", format!("Bearer {BOT_API_KEY}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "user_id": user_id,
                        "channel_id": "channel-1",
                        "content": "Raid starting now!",
                        "identity_name": "Raid Beacon",
                        "role_id": "role-raid",
                    })
                    .to_string(),
                ))
                .unwrap();
            router.oneshot(request).await.unwrap()
        }
    };

    let first = send(router.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(webhook.sent.lock().unwrap().len(), 1);
    assert!(webhook.sent.lock().unwrap()[0].1.contains("<@&role-raid>"));

    let second = send(router).await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(webhook.sent.lock().unwrap().len(), 1);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn beacon_over_the_configured_length_limit_is_rejected() {
    let db = TestDb::new().await.unwrap();
    let webhook = RecordingWebhook::new();
    let router = db.announce_router(webhook.clone());
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let long_body = "x".repeat(2000);
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/beacon"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "user_id": user_id,
                "channel_id": "channel-1",
                "content": long_body,
                "identity_name": "Raid Beacon",
            })
            .to_string(),
        ))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(webhook.sent.lock().unwrap().is_empty());

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn beacon_with_blank_content_is_rejected_before_dispatch() {
    let db = TestDb::new().await.unwrap();
    let webhook = RecordingWebhook::new();
    let router = db.announce_router(webhook.clone());
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/beacon"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "user_id": user_id,
                "channel_id": "channel-1",
                "content": "   ",
                "identity_name": "Raid Beacon",
            })
            .to_string(),
        ))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(webhook.sent.lock().unwrap().is_empty());

    db.cleanup().await.unwrap();
}
