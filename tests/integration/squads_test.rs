//! Squads domain: admin squad creation, paid join with a balance debit, and
//! the "already a member" conflict on a repeat join.

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
async fn joining_a_paid_squad_debits_the_switch_cost() {
    let db = TestDb::new().await.unwrap();
    let squads = db.squads_router();
    let ledger = db.ledger_router();
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    // Fund the user with the guild's default 100-byte starting balance.
    let bootstrap = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/bytes/balance/{user_id}"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    ledger.clone().oneshot(bootstrap).await.unwrap();

    let create_squad = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads"))
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "role_id": "role-1",
                "name": "Red Team",
                "switch_cost": 30,
                "is_default": false,
            })
            .to_string(),
        ))
        .unwrap();
    let created = squads.clone().oneshot(create_squad).await.unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let squad = body_json(created).await;
    let squad_id = squad["id"].as_str().unwrap().to_string();

    let join = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads/{squad_id}/join"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "user_id": user_id, "username": "tester" }).to_string(),
        ))
        .unwrap();
    let join_response = squads.clone().oneshot(join).await.unwrap();
    assert_eq!(join_response.status(), StatusCode::OK);
    let join_result = body_json(join_response).await;
    assert_eq!(join_result["new_balance"], 70);

    let balance_check = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/bytes/balance/{user_id}"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let balance_response = ledger.oneshot(balance_check).await.unwrap();
    let balance = body_json(balance_response).await;
    assert_eq!(balance["balance"], 70);

    // Re-joining the same squad is a conflict, not a no-op success.
    let rejoin = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads/{squad_id}/join"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "user_id": user_id, "username": "tester" }).to_string(),
        ))
        .unwrap();
    let rejoin_response = squads.oneshot(rejoin).await.unwrap();
    assert_eq!(rejoin_response.status(), StatusCode::CONFLICT);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn joining_without_enough_balance_is_rejected_with_402() {
    let db = TestDb::new().await.unwrap();
    let squads = db.squads_router();
    let ledger = db.ledger_router();
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let bootstrap = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/bytes/balance/{user_id}"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    ledger.oneshot(bootstrap).await.unwrap();

    let create_squad = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads"))
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "role_id": "role-2",
                "name": "Expensive Team",
                "switch_cost": 10_000,
                "is_default": false,
            })
            .to_string(),
        ))
        .unwrap();
    let created = squads.clone().oneshot(create_squad).await.unwrap();
    let squad = body_json(created).await;
    let squad_id = squad["id"].as_str().unwrap().to_string();

    let join = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads/{squad_id}/join"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "user_id": user_id, "username": "tester" }).to_string(),
        ))
        .unwrap();
    let response = squads.oneshot(join).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn switching_squads_during_a_campaign_is_locked() {
    let db = TestDb::new().await.unwrap();
    let squads = db.squads_router();
    let ledger = db.ledger_router();
    let guild_id = db.guild_id();
    let user_id = db.user_id();

    let bootstrap = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/bytes/balance/{user_id}"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    ledger.clone().oneshot(bootstrap).await.unwrap();

    let create_squad = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads"))
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "role_id": "role-3",
                "name": "Blue Team",
                "switch_cost": 10,
                "is_default": false,
            })
            .to_string(),
        ))
        .unwrap();
    let created = squads.clone().oneshot(create_squad).await.unwrap();
    let squad = body_json(created).await;
    let squad_id = squad["id"].as_str().unwrap().to_string();

    let first_join = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads/{squad_id}/join"))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "user_id": user_id, "username": "tester" }).to_string(),
        ))
        .unwrap();
    let first_join_response = squads.clone().oneshot(first_join).await.unwrap();
    assert_eq!(first_join_response.status(), StatusCode::OK);

    let create_second_squad = Request::builder()
        .method(Method::POST)
        .uri(format!("/guilds/{guild_id}/squads"))
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "role_id": "role-4",
                "name": "Green Team",
                "switch_cost": 10,
                "is_default": false,
            })
            .to_string(),
        ))
        .unwrap();
    let second_created = squads.clone().oneshot(create_second_squad).await.unwrap();
    let second_squad = body_json(second_created).await;
    let second_squad_id = second_squad["id"].as_str().unwrap().to_string();

    let flip_campaign = Request::builder()
        .method(Method::PUT)
        .uri(format!("/guilds/{guild_id}/bytes/config"))
        .header("authorization", format!("Bearer {ADMIN_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "campaign_active": true }).to_string()))
        .unwrap();
    let flip_response = ledger.oneshot(flip_campaign).await.unwrap();
    assert_eq!(flip_response.status(), StatusCode::OK);

    let switch = Request::builder()
        .method(Method::POST)
        .uri(format!(
            "/guilds/{guild_id}/squads/{second_squad_id}/join"
        ))
        .header("authorization", format!("Bearer {BOT_API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "user_id": user_id, "username": "tester" }).to_string(),
        ))
        .unwrap();
    let switch_response = squads.oneshot(switch).await.unwrap();
    assert_eq!(switch_response.status(), StatusCode::LOCKED);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial_test::serial]
async fn listing_squads_requires_authentication() {
    let db = TestDb::new().await.unwrap();
    let squads = db.squads_router();
    let guild_id = db.guild_id();

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/guilds/{guild_id}/squads"))
        .body(Body::empty())
        .unwrap();
    let response = squads.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    db.cleanup().await.unwrap();
}
