//! Inviting people to a stash and answering invitations.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use prepper_core::error::ErrorKind;
use prepper_database::repositories::InvitationRepository;
use prepper_entity::stash::InvitationStatus;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_invite_by_email_binds_registered_account() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Lars").await;
    let invitee = app.register_user("Mette").await;
    let stash_id = app.create_stash(&owner, "Beredskab").await;

    let invited = app
        .request(
            "POST",
            &format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "email": invitee.email.to_uppercase(), "language": "da" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(invited.status, StatusCode::CREATED, "{:?}", invited.body);
    assert_eq!(invited.body["status"], "PENDING");
    assert_eq!(invited.body["userId"], invitee.id.to_string());
    assert_eq!(invited.body["email"], invitee.email.as_str());

    {
        let sent = app.mailer.sent.lock().unwrap();
        let mail = sent
            .iter()
            .find(|m| m.to.contains(&invitee.email))
            .expect("invitation e-mail sent");
        assert!(mail.html.contains("accept-invitation?id="));
    }

    let mine = app
        .request("GET", "/api/invitations", None, Some(&invitee.token))
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    let list = mine.body.as_array().unwrap();
    assert!(list.iter().any(|i| i["stashName"] == "Beredskab"));
}

#[tokio::test]
async fn test_duplicate_pending_invitation_is_rejected() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Niels").await;
    let stash_id = app.create_stash(&owner, "Garage").await;
    let address = format!("later-{}@example.com", Uuid::new_v4());
    let uri = format!("/api/stashes/{stash_id}/invitations");

    let first = app
        .request("POST", &uri, Some(json!({ "email": address })), Some(&owner.token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert!(first.body["userId"].is_null());

    let second = app
        .request("POST", &uri, Some(json!({ "email": address })), Some(&owner.token))
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invite_requires_a_target_and_a_valid_address() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Ole").await;
    let stash_id = app.create_stash(&owner, "Skur").await;
    let uri = format!("/api/stashes/{stash_id}/invitations");

    let empty = app
        .request("POST", &uri, Some(json!({})), Some(&owner.token))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .request("POST", &uri, Some(json!({ "email": "not-an-address" })), Some(&owner.token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_members_cannot_invite() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Pia").await;
    let member = app.register_user("Rasmus").await;
    let stash_id = app.create_stash(&owner, "Loft").await;
    app.add_member(&owner, &stash_id, &member).await;

    let response = app
        .request(
            "POST",
            &format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "email": format!("x-{}@example.com", Uuid::new_v4()) })),
            Some(&member.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_accept_creates_membership_once() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Sofie").await;
    let invitee = app.register_user("Tobias").await;
    let stash_id = app.create_stash(&owner, "Bunker").await;

    let invited = app
        .request(
            "POST",
            &format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "userId": invitee.id })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(invited.status, StatusCode::CREATED, "{:?}", invited.body);
    let invitation_id = invited.body["id"].as_str().unwrap().to_string();

    let viewed = app
        .request(
            "GET",
            &format!("/api/invitations/{invitation_id}"),
            None,
            Some(&invitee.token),
        )
        .await;
    assert_eq!(viewed.status, StatusCode::OK);
    assert_eq!(viewed.body["isExpired"], false);
    assert_eq!(viewed.body["stashName"], "Bunker");

    let accepted = app
        .request(
            "PATCH",
            &format!("/api/invitations/{invitation_id}"),
            Some(json!({ "action": "accept" })),
            Some(&invitee.token),
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.body["status"], "ACCEPTED");

    let again = app
        .request(
            "PATCH",
            &format!("/api/invitations/{invitation_id}"),
            Some(json!({ "action": "accept" })),
            Some(&invitee.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);

    let stash = app
        .request("GET", &format!("/api/stashes/{stash_id}"), None, Some(&invitee.token))
        .await;
    assert_eq!(stash.status, StatusCode::OK);
    assert_eq!(stash.body["role"], "MEMBER");
    assert!(stash.body.get("invitations").is_none());

    // Already a member, so a new invitation is refused.
    let reinvite = app
        .request(
            "POST",
            &format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "email": invitee.email })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(reinvite.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_answered_invitation_cannot_be_accepted_from_a_stale_read() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Rikke").await;
    let invitee = app.register_user("Svend").await;
    let stash_id = app.create_stash(&owner, "Loft").await;

    let invited = app
        .request(
            "POST",
            &format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "email": invitee.email })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(invited.status, StatusCode::CREATED, "{:?}", invited.body);
    let invitation_id: Uuid = invited.body["id"].as_str().unwrap().parse().unwrap();

    let repo = InvitationRepository::new(app.db_pool.clone());
    let pending = repo.find_by_id(invitation_id).await.unwrap().unwrap();
    assert_eq!(pending.status, InvitationStatus::Pending);

    let declined = app
        .request(
            "PATCH",
            &format!("/api/invitations/{invitation_id}"),
            Some(json!({ "action": "decline" })),
            Some(&invitee.token),
        )
        .await;
    assert_eq!(declined.status, StatusCode::OK);

    let err = repo.accept(&pending, invitee.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    let err = repo
        .set_status(invitation_id, InvitationStatus::Expired)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let stored = repo.find_by_id(invitation_id).await.unwrap().unwrap();
    assert_eq!(stored.status, InvitationStatus::Declined);
    let stash = app
        .request("GET", &format!("/api/stashes/{stash_id}"), None, Some(&invitee.token))
        .await;
    assert_eq!(stash.status, StatusCode::NOT_FOUND);

    let accept_after_decline = app
        .request(
            "PATCH",
            &format!("/api/invitations/{invitation_id}"),
            Some(json!({ "action": "accept" })),
            Some(&invitee.token),
        )
        .await;
    assert_eq!(accept_after_decline.status, StatusCode::BAD_REQUEST);
    assert_eq!(accept_after_decline.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_only_the_invitee_may_answer() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Ulla").await;
    let invitee = app.register_user("Viggo").await;
    let stranger = app.register_user("Willy").await;
    let stash_id = app.create_stash(&owner, "Kælder").await;

    let invited = app
        .request(
            "POST",
            &format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "email": invitee.email })),
            Some(&owner.token),
        )
        .await;
    let invitation_id = invited.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/api/invitations/{invitation_id}"),
            Some(json!({ "action": "accept" })),
            Some(&stranger.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let declined = app
        .request(
            "PATCH",
            &format!("/api/invitations/{invitation_id}"),
            Some(json!({ "action": "decline" })),
            Some(&invitee.token),
        )
        .await;
    assert_eq!(declined.status, StatusCode::OK);
    assert_eq!(declined.body["status"], "DECLINED");
}

#[tokio::test]
async fn test_revoke_invitation() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.register_user("Yrsa").await;
    let stash_id = app.create_stash(&owner, "Depot").await;

    let invited = app
        .request(
            "POST",
            &format!("/api/stashes/{stash_id}/invitations"),
            Some(json!({ "email": format!("z-{}@example.com", Uuid::new_v4()) })),
            Some(&owner.token),
        )
        .await;
    let invitation_id = invited.body["id"].as_str().unwrap().to_string();
    let uri = format!("/api/stashes/{stash_id}/invitations/{invitation_id}");

    let revoked = app.request("DELETE", &uri, None, Some(&owner.token)).await;
    assert_eq!(revoked.status, StatusCode::OK);

    let missing = app.request("DELETE", &uri, None, Some(&owner.token)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
