//! Items, photos and photo analysis.

use axum::http::{StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::json;

use crate::helpers::{TestApp, TestUser, multipart_upload};

async fn create_item(app: &TestApp, user: &TestUser, body: serde_json::Value) -> serde_json::Value {
    let response = app
        .request("POST", "/api/items", Some(body), Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body
}

#[tokio::test]
async fn test_items_carry_expiration_status() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Aksel").await;
    let stash_id = app.personal_stash(&user).await;
    let soon = (Utc::now() + Duration::days(2)).format("%Y-%m-%d").to_string();

    let water = create_item(
        &app,
        &user,
        json!({ "stashId": stash_id, "name": "Vand", "category": "WATER", "quantity": 12, "expirationDate": soon }),
    )
    .await;
    assert_eq!(water["expirationStatus"], "danger");
    assert_eq!(water["quantity"], 12);
    assert_eq!(water["photos"], json!([]));

    let matches = create_item(&app, &user, json!({ "stashId": stash_id, "name": "Tændstikker" })).await;
    assert_eq!(matches["expirationStatus"], "safe");
    assert_eq!(matches["category"], "OTHER");
    assert_eq!(matches["quantity"], 1);

    let all = app
        .request("GET", &format!("/api/items?stashId={stash_id}"), None, Some(&user.token))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().unwrap().len(), 2);

    let expiring = app
        .request(
            "GET",
            &format!("/api/items?stashId={stash_id}&expiringSoon=true"),
            None,
            Some(&user.token),
        )
        .await;
    let names: Vec<_> = expiring
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Vand".to_string()]);
}

#[tokio::test]
async fn test_item_validation() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Bente").await;
    let stash_id = app.personal_stash(&user).await;

    let nameless = app
        .request(
            "POST",
            "/api/items",
            Some(json!({ "stashId": stash_id, "name": "  " })),
            Some(&user.token),
        )
        .await;
    assert_eq!(nameless.status, StatusCode::BAD_REQUEST);

    let bad_date = app
        .request(
            "POST",
            "/api/items",
            Some(json!({ "stashId": stash_id, "name": "Ris", "expirationDate": "next week" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    let unscoped = app
        .request("GET", "/api/items", None, Some(&user.token))
        .await;
    assert_eq!(unscoped.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_clears_expiration_with_null() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Claus").await;
    let stash_id = app.personal_stash(&user).await;
    let item = create_item(
        &app,
        &user,
        json!({ "stashId": stash_id, "name": "Bønner", "description": "dåse", "expirationDate": "2020-01-01" }),
    )
    .await;
    assert_eq!(item["expirationStatus"], "expired");
    let uri = format!("/api/items/{}", item["id"].as_str().unwrap());

    let renamed = app
        .request("PATCH", &uri, Some(json!({ "quantity": 4 })), Some(&user.token))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["quantity"], 4);
    assert_eq!(renamed.body["description"], "dåse");

    let cleared = app
        .request("PATCH", &uri, Some(json!({ "expirationDate": null })), Some(&user.token))
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["expirationDate"].is_null());
    assert_eq!(cleared.body["expirationStatus"], "safe");
}

#[tokio::test]
async fn test_photo_upload_fetch_and_cleanup() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Ditte").await;
    let outsider = app.register_user("Erik").await;
    let stash_id = app.personal_stash(&user).await;
    let item = create_item(&app, &user, json!({ "stashId": stash_id, "name": "Plaster" })).await;
    let item_id = item["id"].as_str().unwrap().to_string();

    let png = b"\x89PNG\r\n\x1a\nfake-image";
    let uploaded = app.send(multipart_upload(&item_id, &user.token, png)).await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{:?}", uploaded.body);
    assert_eq!(uploaded.body["mimeType"], "image/png");
    let photo_id = uploaded.body["id"].as_str().unwrap().to_string();

    let fetched = app
        .request("GET", &format!("/api/photos/{photo_id}"), None, Some(&user.token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.raw, png.to_vec());
    assert_eq!(fetched.headers[header::CACHE_CONTROL], "public, max-age=31536000");
    assert_eq!(fetched.headers[header::CONTENT_TYPE], "image/png");

    let hidden = app
        .request("GET", &format!("/api/photos/{photo_id}"), None, Some(&outsider.token))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let foreign_upload = app.send(multipart_upload(&item_id, &outsider.token, png)).await;
    assert_eq!(foreign_upload.status, StatusCode::NOT_FOUND);

    let with_photo = app
        .request("GET", &format!("/api/items/{item_id}"), None, Some(&user.token))
        .await;
    assert_eq!(with_photo.body["photos"].as_array().unwrap().len(), 1);

    assert!(!app.storage.is_empty().await);
    let deleted = app
        .request("DELETE", &format!("/api/items/{item_id}"), None, Some(&user.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(app.storage.is_empty().await);
}

#[tokio::test]
async fn test_analysis_fills_only_empty_fields() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Frida").await;
    let stash_id = app.personal_stash(&user).await;
    let item = create_item(&app, &user, json!({ "stashId": stash_id, "name": "Min pose" })).await;
    let item_id = item["id"].as_str().unwrap().to_string();

    let uploaded = app
        .send(multipart_upload(&item_id, &user.token, b"jpeg-bytes"))
        .await;
    let photo_id = uploaded.body["id"].as_str().unwrap().to_string();

    let analysis = app
        .request(
            "POST",
            "/api/ai/analyze",
            Some(json!({
                "photoId": photo_id,
                "imageBase64": "aGVsbG8=",
                "mimeType": "image/png",
                "language": "da"
            })),
            Some(&user.token),
        )
        .await;
    assert_eq!(analysis.status, StatusCode::OK, "{:?}", analysis.body);
    assert_eq!(analysis.body["name"], "Havregryn");

    let updated = app
        .request("GET", &format!("/api/items/{item_id}"), None, Some(&user.token))
        .await;
    assert_eq!(updated.body["name"], "Min pose");
    assert_eq!(updated.body["description"], "1 kg");
    assert_eq!(updated.body["category"], "DRY_GOODS");
    assert_eq!(updated.body["aiExtracted"], true);
    assert!(updated.body["expirationDate"].as_str().unwrap().starts_with("2031-03-01"));
}

#[tokio::test]
async fn test_analysis_rejects_unsupported_images() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let user = app.register_user("Gorm").await;
    let response = app
        .request(
            "POST",
            "/api/ai/analyze",
            Some(json!({ "imageBase64": "aGVsbG8=", "mimeType": "image/tiff" })),
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
