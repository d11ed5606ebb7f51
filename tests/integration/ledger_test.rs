//! Ledger domain: balance bootstrap, daily claim (and its cooldown), and
//! peer-to-peer transfer.

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

#[tokio::test]
#[serial_test::serial]
async fn balance_is_created_lazily_with_the_guild_starting_balance() {
    let db = TestDb::new().await.unwrap();
    let router = db.ledger_router();
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/bytes/balance/{user_id}"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let balance = body_json(response).await;
    assert_eq!(balance["guild_id"], guild_id);
    assert_eq!(balance["user_id"], user_id);
    assert_eq!(balance["balance"], 100);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn daily_claim_pays_out_once_then_rejects_a_same_day_repeat() {
    let db = TestDb::new().await.unwrap();
    let router = db.ledger_router();
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let claim = |router: axum::Router, guild_id: String, user_id: String| async move {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/guilds/{guild_id}/bytes/daily"))
            .header("authorization", format!("Bearer {BOT_API_KEY}"))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "user_id": user_id, "username": "tester" }).to_string(),
            ))
            .unwrap();
        router.oneshot(request).await.unwrap()
    };

    let first = claim(router.clone(), guild_id.clone(), user_id.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = body_json(first).await;
    assert_eq!(first_body["earned"], 10);
    assert_eq!(first_body["streak_count"], 1);

    let second = claim(router.clone(), guild_id.clone(), user_id.clone()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn transfer_moves_bytes_between_two_users_and_logs_it() {
    let db = TestDb::new().await.unwrap();
    let router = db.ledger_router();
    let guild_id = db.guild_id();
    let giver = db.user_id();
    let receiver = db.user_id();

    // Fund the giver via the welcome-bonus balance bootstrap.
    let bootstrap = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/bytes/balance/{giver}"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(bootstrap).await.unwrap();

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/bytes/transfer"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "giver_id": giver,
                "giver_username": "giver",
                "receiver_id": receiver,
                "receiver_username": "receiver",
                "amount": 25,
                "reason": "thanks for the help",
            })
            .to_string(),
        ))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result = body_json(response).await;
    assert_eq!(result["giver_balance"], 75);
    assert_eq!(result["receiver_balance"], 25);
    assert_eq!(result["amount"], 25);

    // Admin-authenticated history read also accepts the bot key's sibling
    // `AnyAuth` tier.
    let history = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/bytes/transactions"))
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let history_response = router.oneshot(history).await.unwrap();
    assert_eq!(history_response.status(), StatusCode::OK);
    let transactions = body_json(history_response).await;
    assert!(transactions.as_array().unwrap().iter().any(|t| t["reason"] == "thanks for the help"));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn transfer_without_a_bearer_token_is_rejected() {
    let db = TestDb::new().await.unwrap();
    let router = db.ledger_router();
    let guild_id = db.guild_id();

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/bytes/transfer"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "giver_id": "a",
                "giver_username": "a",
                "receiver_id": "b",
                "receiver_username": "b",
                "amount": 1,
            })
            .to_string(),
        ))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    db.cleanup().await.unwrap();
}
