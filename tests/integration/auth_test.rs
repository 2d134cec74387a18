//! Account registration, login and password recovery.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{PASSWORD, TestApp};

/// Pull the reset token out of the last e-mail sent to `address`.
fn reset_token_sent_to(app: &TestApp, address: &str) -> Option<String> {
    let sent = app.mailer.sent.lock().unwrap();
    let email = sent.iter().rev().find(|m| m.to.iter().any(|t| t == address))?;
    let start = email.html.find("reset-password?token=")? + "reset-password?token=".len();
    let rest = &email.html[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

#[tokio::test]
async fn test_register_creates_account_and_personal_stash() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Anna").await;

    let me = app
        .request("GET", "/api/auth/me", None, Some(&user.token))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], user.email.as_str());
    assert!(me.body.get("passwordHash").is_none());

    let stashes = app
        .request("GET", "/api/stashes", None, Some(&user.token))
        .await;
    assert_eq!(stashes.status, StatusCode::OK);
    let list = stashes.body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "My Stash");
    assert_eq!(list[0]["role"], "OWNER");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Bo").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": user.email.to_uppercase(), "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": format!("{}@example.com", Uuid::new_v4()), "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Carl").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": "wrong password" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["message"], response.body["message"]);
}

#[tokio::test]
async fn test_account_without_password_signs_in_only_after_reset() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let email = format!("imported-{}@example.com", Uuid::new_v4());
    sqlx::query("INSERT INTO users (id, email, password_hash, name) VALUES ($1, $2, NULL, $3)")
        .bind(Uuid::new_v4())
        .bind(&email)
        .bind("Inge")
        .execute(&app.db_pool)
        .await
        .unwrap();

    let refused = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(refused.status, StatusCode::UNAUTHORIZED);
    assert_eq!(refused.body["message"], "Invalid email or password");

    let requested = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": email })),
            None,
        )
        .await;
    assert_eq!(requested.status, StatusCode::OK);
    let token = reset_token_sent_to(&app, &email).expect("reset e-mail sent");

    let reset = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": token, "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(reset.status, StatusCode::OK, "{:?}", reset.body);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
}

#[tokio::test]
async fn test_forgot_password_answers_the_same_for_unknown_addresses() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let response = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": format!("ghost-{}@example.com", Uuid::new_v4()) })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_password_reset_round_trip() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Dorte").await;

    let requested = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": user.email, "language": "da" })),
            None,
        )
        .await;
    assert_eq!(requested.status, StatusCode::OK);

    let token = reset_token_sent_to(&app, &user.email).expect("reset e-mail sent");

    let reset = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": token, "password": "a much newer secret" })),
            None,
        )
        .await;
    assert_eq!(reset.status, StatusCode::OK, "{:?}", reset.body);

    // Tokens are single use.
    let again = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": token, "password": "yet another secret" })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": "a much newer secret" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_reset_with_unknown_token_fails() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let response = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": "deadbeef", "password": "long enough" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
