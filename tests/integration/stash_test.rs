//! Stash lifecycle, membership roles and the checklist.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, multipart_upload};

#[tokio::test]
async fn test_outsiders_cannot_see_a_stash() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Owner").await;
    let outsider = app.register_user("Outsider").await;
    let stash_id = app.personal_stash(&owner).await;

    for uri in [
        format!("/api/stashes/{stash_id}"),
        format!("/api/stashes/{stash_id}/members"),
        format!("/api/items?stashId={stash_id}"),
        format!("/api/checklist?stashId={stash_id}"),
    ] {
        let response = app.request("GET", &uri, None, Some(&outsider.token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_outsiders_cannot_change_a_stash() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Owner").await;
    let outsider = app.register_user("Outsider").await;
    let stash_id = app.personal_stash(&owner).await;

    let item = app
        .request(
            "POST",
            "/api/items",
            Some(json!({ "stashId": stash_id, "name": "Vand" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(item.status, StatusCode::CREATED, "{:?}", item.body);
    let item_id = item.body["id"].as_str().unwrap().to_string();

    let attempts = [
        ("PATCH", format!("/api/stashes/{stash_id}"), Some(json!({ "name": "Mit" }))),
        ("DELETE", format!("/api/stashes/{stash_id}"), None),
        (
            "PATCH",
            format!("/api/stashes/{stash_id}/members/{}", owner.id),
            Some(json!({ "role": "ADMIN" })),
        ),
        ("DELETE", format!("/api/stashes/{stash_id}/members/{}", owner.id), None),
        (
            "POST",
            format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "email": "ven@example.com" })),
        ),
        (
            "POST",
            "/api/items".to_string(),
            Some(json!({ "stashId": stash_id, "name": "Konserves" })),
        ),
        (
            "POST",
            "/api/checklist".to_string(),
            Some(json!({ "stashId": stash_id, "name": "Lommelygte" })),
        ),
        ("PATCH", format!("/api/items/{item_id}"), Some(json!({ "quantity": 9 }))),
        ("DELETE", format!("/api/items/{item_id}"), None),
    ];
    for (method, uri, body) in attempts {
        let response = app.request(method, &uri, body, Some(&outsider.token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method} {uri}");
    }

    let upload = app
        .send(multipart_upload(&item_id, &outsider.token, b"\x89PNG\r\n\x1a\nlabel"))
        .await;
    assert_eq!(upload.status, StatusCode::NOT_FOUND);

    let stash = app
        .request("GET", &format!("/api/stashes/{stash_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(stash.status, StatusCode::OK);
    assert_eq!(stash.body["role"], "OWNER");
    assert_eq!(stash.body["itemCount"], 1);
    assert_eq!(stash.body["members"].as_array().unwrap().len(), 1);

    let unchanged = app
        .request("GET", &format!("/api/items/{item_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(unchanged.status, StatusCode::OK);
    assert_eq!(unchanged.body["quantity"], 1);
    assert!(unchanged.body["photos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rename_and_delete_stash() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Eva").await;
    let stash_id = app.create_stash(&owner, "Sommerhus").await;

    let renamed = app
        .request(
            "PATCH",
            &format!("/api/stashes/{stash_id}"),
            Some(json!({ "name": "  Kælder  " })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["name"], "Kælder");

    let blank = app
        .request(
            "PATCH",
            &format!("/api/stashes/{stash_id}"),
            Some(json!({ "name": "   " })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let details = app
        .request("GET", &format!("/api/stashes/{stash_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.body["role"], "OWNER");
    assert_eq!(details.body["itemCount"], 0);
    assert!(details.body["invitations"].is_array());

    let deleted = app
        .request("DELETE", &format!("/api/stashes/{stash_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/stashes/{stash_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_delete_only_stash() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Finn").await;
    let stash_id = app.personal_stash(&owner).await;

    let response = app
        .request("DELETE", &format!("/api/stashes/{stash_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_member_roles_and_leaving() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Gitte").await;
    let helper = app.register_user("Hans").await;
    let guest = app.register_user("Ida").await;
    let stash_id = app.create_stash(&owner, "Fælles lager").await;
    app.add_member(&owner, &stash_id, &helper).await;
    app.add_member(&owner, &stash_id, &guest).await;

    // Plain members cannot rename or remove anyone.
    let rename = app
        .request(
            "PATCH",
            &format!("/api/stashes/{stash_id}"),
            Some(json!({ "name": "Mit lager" })),
            Some(&helper.token),
        )
        .await;
    assert_eq!(rename.status, StatusCode::FORBIDDEN);

    let promoted = app
        .request(
            "PATCH",
            &format!("/api/stashes/{stash_id}/members/{}", helper.id),
            Some(json!({ "role": "ADMIN" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK, "{:?}", promoted.body);
    assert_eq!(promoted.body["role"], "ADMIN");

    let make_owner = app
        .request(
            "PATCH",
            &format!("/api/stashes/{stash_id}/members/{}", guest.id),
            Some(json!({ "role": "OWNER" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(make_owner.status, StatusCode::BAD_REQUEST);

    // An admin may not remove the owner.
    let remove_owner = app
        .request(
            "DELETE",
            &format!("/api/stashes/{stash_id}/members/{}", owner.id),
            None,
            Some(&helper.token),
        )
        .await;
    assert_eq!(remove_owner.status, StatusCode::FORBIDDEN);

    let owner_leaves = app
        .request(
            "DELETE",
            &format!("/api/stashes/{stash_id}/members/{}", owner.id),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(owner_leaves.status, StatusCode::BAD_REQUEST);

    let guest_leaves = app
        .request(
            "DELETE",
            &format!("/api/stashes/{stash_id}/members/{}", guest.id),
            None,
            Some(&guest.token),
        )
        .await;
    assert_eq!(guest_leaves.status, StatusCode::OK);

    let members = app
        .request(
            "GET",
            &format!("/api/stashes/{stash_id}/members"),
            None,
            Some(&helper.token),
        )
        .await;
    assert_eq!(members.status, StatusCode::OK);
    assert_eq!(members.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_checklist_seeds_defaults_once() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Jens").await;
    let stash_id = app.personal_stash(&owner).await;
    let uri = format!("/api/checklist?stashId={stash_id}");

    let first = app.request("GET", &uri, None, Some(&owner.token)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body.as_array().unwrap().len(), 28);

    let created = app
        .request(
            "POST",
            "/api/checklist",
            Some(json!({ "stashId": stash_id, "name": "Stearinlys", "category": "TOOLS" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["isDefault"], false);

    let second = app.request("GET", &uri, None, Some(&owner.token)).await;
    assert_eq!(second.body.as_array().unwrap().len(), 29);
}

#[tokio::test]
async fn test_checklist_requires_stash_id() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Karen").await;
    let response = app
        .request("GET", "/api/checklist", None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
