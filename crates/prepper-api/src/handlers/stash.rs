//! Stash and membership handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use prepper_entity::stash::{MemberProfile, Stash, StashSummary};
use prepper_service::stash::StashDetails;

use crate::dto::request::{ChangeRoleRequest, StashNameRequest};
use crate::dto::response::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/stashes
pub async fn list_stashes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<StashSummary>>, ApiError> {
    let stashes = state.stash_service.list(&auth).await?;
    Ok(Json(stashes))
}

/// POST /api/stashes
pub async fn create_stash(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<StashNameRequest>,
) -> Result<(StatusCode, Json<Stash>), ApiError> {
    let stash = state.stash_service.create(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(stash)))
}

/// GET /api/stashes/{id}
pub async fn get_stash(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<StashDetails>, ApiError> {
    let details = state.stash_service.get(&auth, id).await?;
    Ok(Json(details))
}

/// PATCH /api/stashes/{id}
pub async fn rename_stash(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<StashNameRequest>,
) -> Result<Json<Stash>, ApiError> {
    let stash = state.stash_service.rename(&auth, id, &req.name).await?;
    Ok(Json(stash))
}

/// DELETE /api/stashes/{id}
pub async fn delete_stash(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.stash_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/stashes/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<MemberProfile>>, ApiError> {
    let members = state.stash_service.members(&auth, id).await?;
    Ok(Json(members))
}

/// DELETE /api/stashes/{id}/members/{user_id}
///
/// Removing oneself means leaving the stash.
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((id, user_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.stash_service.remove_member(&auth, id, user_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// PATCH /api/stashes/{id}/members/{user_id}
pub async fn change_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((id, user_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<ChangeRoleRequest>,
) -> Result<Json<MemberProfile>, ApiError> {
    let member = state
        .stash_service
        .change_role(&auth, id, user_id, req.role)
        .await?;
    Ok(Json(member))
}
