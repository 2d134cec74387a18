//! Routes that answer without touching the database.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{CRON_SECRET, TestApp};

#[tokio::test]
async fn test_health_reports_disconnected_database_with_200() {
    let app = TestApp::offline();
    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "disconnected");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_service_worker_script_is_served() {
    let app = TestApp::offline();
    let response = app.request("GET", "/push-sw.js", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/javascript")
    );
    let script = String::from_utf8(response.raw).unwrap();
    assert!(script.contains("addEventListener('push'"));
    assert!(script.contains("Prepper: "));
}

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let app = TestApp::offline();

    for (method, uri) in [
        ("GET", "/api/auth/me"),
        ("GET", "/api/stashes"),
        ("GET", "/api/items"),
        ("GET", "/api/invitations"),
        ("POST", "/api/push/test"),
    ] {
        let response = app.request(method, uri, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(response.body["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::offline();
    let response = app
        .request("GET", "/api/stashes", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_cron_digest_rejects_wrong_secret() {
    let app = TestApp::offline();

    let missing = app
        .request("GET", "/api/cron/check-expiring", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let wrong = app
        .request("GET", "/api/cron/check-expiring", None, Some("nope"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_threshold_alerts_accept_only_the_api_key_header() {
    let app = TestApp::offline();

    // A bearer token carrying the right secret is not enough here.
    let bearer = app
        .request("POST", "/api/push/check-expiring", None, Some(CRON_SECRET))
        .await;
    assert_eq!(bearer.status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("POST")
        .uri("/api/push/check-expiring")
        .header("x-api-key", "wrong")
        .body(Body::empty())
        .unwrap();
    let wrong_key = app.send(request).await;
    assert_eq!(wrong_key.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cron_rejects_everything_when_secret_unset() {
    let app = TestApp::offline_with(|config| config.cron.secret.clear());
    let response = app
        .request("GET", "/api/cron/check-expiring", None, Some(""))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_vapid_key_unavailable_without_configuration() {
    let app = TestApp::offline();
    let response = app
        .request("GET", "/api/push/vapid-public-key", None, None)
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_vapid_key_returned_when_configured() {
    let app = TestApp::offline_with(|config| {
        config.push.vapid_public_key = "BPxT-_aa".to_string();
        config.push.vapid_private_key = "c2VjcmV0".to_string();
    });
    let response = app
        .request("GET", "/api/push/vapid-public-key", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["publicKey"], "BPxT-_aa");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::offline();
    let response = app.request("GET", "/api/nothing-here", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_input_is_a_validation_error() {
    let app = TestApp::offline();
    let token = app.token_for(Uuid::new_v4(), "ida@example.com");

    let missing_stash = app
        .request("POST", "/api/items", Some(json!({ "name": "Vand" })), Some(&token))
        .await;
    assert_eq!(missing_stash.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_stash.body["error"], "VALIDATION_ERROR");
    assert!(missing_stash.body["message"].is_string());

    let unknown_category = app
        .request(
            "POST",
            "/api/items",
            Some(json!({ "stashId": Uuid::new_v4(), "name": "Vand", "category": "SNACKS" })),
            Some(&token),
        )
        .await;
    assert_eq!(unknown_category.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_category.body["error"], "VALIDATION_ERROR");

    let bad_id = app
        .request("GET", "/api/items/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["error"], "VALIDATION_ERROR");

    let bad_member = app
        .request(
            "DELETE",
            &format!("/api/stashes/{}/members/nobody", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(bad_member.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_member.body["error"], "VALIDATION_ERROR");

    let bad_filter = app
        .request("GET", "/api/items?stashId=nope", None, Some(&token))
        .await;
    assert_eq!(bad_filter.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_filter.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unparseable_body_is_a_validation_error() {
    let app = TestApp::offline();
    let token = app.token_for(Uuid::new_v4(), "ida@example.com");

    let truncated = Request::builder()
        .method("POST")
        .uri("/api/stashes")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.send(truncated).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let plain = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("ida"))
        .unwrap();
    let response = app.send(plain).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let not_multipart = Request::builder()
        .method("POST")
        .uri("/api/photos/upload")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.send(not_multipart).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
