//! Push subscriptions, test notifications and the cron-triggered runs.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{CRON_SECRET, TestApp, TestUser};

fn endpoint() -> String {
    format!("https://push.example.com/send/{}", Uuid::new_v4())
}

async fn subscribe(app: &TestApp, user: &TestUser, endpoint: &str) {
    let response = app
        .request(
            "POST",
            "/api/push/subscribe",
            Some(json!({
                "endpoint": endpoint,
                "keys": { "p256dh": "BPxT+/aa==", "auth": "c2VjcmV0" }
            })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

async fn subscription_count(app: &TestApp, user: &TestUser) -> i64 {
    sqlx::query_scalar("SELECT count(*) FROM push_subscriptions WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_subscribe_normalizes_keys_and_upserts() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Hanne").await;
    let endpoint = endpoint();

    subscribe(&app, &user, &endpoint).await;
    subscribe(&app, &user, &endpoint).await;
    assert_eq!(subscription_count(&app, &user).await, 1);

    let stored: String =
        sqlx::query_scalar("SELECT p256dh FROM push_subscriptions WHERE endpoint = $1")
            .bind(&endpoint)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(stored, "BPxT-_aa");

    let removed = app
        .request(
            "DELETE",
            "/api/push/subscribe",
            Some(json!({ "endpoint": endpoint })),
            Some(&user.token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(subscription_count(&app, &user).await, 0);
}

#[tokio::test]
async fn test_subscribe_rejects_insecure_endpoint() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Ib").await;
    let response = app
        .request(
            "POST",
            "/api/push/subscribe",
            Some(json!({
                "endpoint": "http://push.example.com/send/1",
                "keys": { "p256dh": "BPxT-_aa", "auth": "c2VjcmV0" }
            })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_test_push_needs_a_subscription() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Jytte").await;

    let without = app
        .request("POST", "/api/push/test", None, Some(&user.token))
        .await;
    assert_eq!(without.status, StatusCode::BAD_REQUEST);

    let endpoint = endpoint();
    subscribe(&app, &user, &endpoint).await;
    let with = app
        .request("POST", "/api/push/test", None, Some(&user.token))
        .await;
    assert_eq!(with.status, StatusCode::OK);
    assert_eq!(with.body, json!({ "success": true, "sent": 1, "total": 1 }));

    let delivered = app.push.delivered_to(&endpoint);
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].title, "Test");
}

#[tokio::test]
async fn test_digest_reaches_every_member_and_prunes_gone_subscriptions() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Kim").await;
    let member = app.register_user("Lone").await;
    let stash_id = app.create_stash(&owner, "Fælles").await;
    app.add_member(&owner, &stash_id, &member).await;

    let tomorrow = (Utc::now() + Duration::hours(30)).to_rfc3339();
    let created = app
        .request(
            "POST",
            "/api/items",
            Some(json!({ "stashId": stash_id, "name": "Mælkepulver", "expirationDate": tomorrow })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let owner_endpoint = endpoint();
    let member_endpoint = endpoint();
    subscribe(&app, &owner, &owner_endpoint).await;
    subscribe(&app, &member, &member_endpoint).await;
    app.push.mark_gone(&member_endpoint);

    let run = app
        .request("GET", "/api/cron/check-expiring", None, Some(CRON_SECRET))
        .await;
    assert_eq!(run.status, StatusCode::OK, "{:?}", run.body);
    assert_eq!(run.body["success"], true);
    assert!(run.body["itemsChecked"].as_u64().unwrap() >= 1);
    assert!(run.body["subscriptionsRemoved"].as_u64().unwrap() >= 1);

    let delivered = app.push.delivered_to(&owner_endpoint);
    assert!(
        delivered
            .iter()
            .any(|m| m.title == "Udløbsadvarsel" && m.body.contains("Mælkepulver"))
    );
    assert_eq!(subscription_count(&app, &member).await, 0);
    assert_eq!(subscription_count(&app, &owner).await, 1);
}

#[tokio::test]
async fn test_threshold_alerts_with_api_key() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Mads").await;
    let stash_id = app.personal_stash(&owner).await;
    let in_three_days = (Utc::now() + Duration::days(3) - Duration::hours(2)).to_rfc3339();
    app.request(
        "POST",
        "/api/items",
        Some(json!({ "stashId": stash_id, "name": "Gasflaske", "expirationDate": in_three_days })),
        Some(&owner.token),
    )
    .await;
    let endpoint = endpoint();
    subscribe(&app, &owner, &endpoint).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/push/check-expiring")
        .header("x-api-key", CRON_SECRET)
        .body(Body::empty())
        .unwrap();
    let run = app.send(request).await;
    assert_eq!(run.status, StatusCode::OK, "{:?}", run.body);

    let delivered = app.push.delivered_to(&endpoint);
    assert!(
        delivered
            .iter()
            .any(|m| m.title == "Expiration Alert" && m.body == "Gasflaske expires in 3 days")
    );
}
