//! Invitation handlers, for stash admins and for invitees.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use prepper_entity::stash::{Invitation, InvitationDetails};
use prepper_service::stash::InvitationView;

use crate::dto::request::{InviteRequest, RespondInvitationRequest};
use crate::dto::response::SuccessResponse;
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/stashes/{id}/invitations
pub async fn list_stash_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<Invitation>>, ApiError> {
    let invitations = state.invitation_service.list_for_stash(&auth, id).await?;
    Ok(Json(invitations))
}

/// POST /api/stashes/{id}/invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<InviteRequest>,
) -> Result<(StatusCode, Json<Invitation>), ApiError> {
    validate_body(&req)?;
    let invitation = state
        .invitation_service
        .invite(&auth, id, req.into_service())
        .await?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

/// DELETE /api/stashes/{id}/invitations/{invitation_id}
pub async fn revoke_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((id, invitation_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .invitation_service
        .revoke(&auth, id, invitation_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/invitations
pub async fn list_my_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<InvitationDetails>>, ApiError> {
    let invitations = state.invitation_service.list_mine(&auth).await?;
    Ok(Json(invitations))
}

/// GET /api/invitations/{id}
pub async fn get_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<InvitationView>, ApiError> {
    let invitation = state.invitation_service.get_mine(&auth, id).await?;
    Ok(Json(invitation))
}

/// PATCH /api/invitations/{id}
pub async fn respond_to_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<RespondInvitationRequest>,
) -> Result<Json<Invitation>, ApiError> {
    let invitation = state
        .invitation_service
        .respond(&auth, id, req.action)
        .await?;
    Ok(Json(invitation))
}
