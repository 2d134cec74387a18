//! Checklist handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use prepper_core::error::AppError;
use prepper_entity::checklist::ChecklistItem;
use prepper_service::checklist::ChecklistUpdate;

use crate::dto::request::{ChecklistQuery, CreateChecklistRequest, UpdateChecklistRequest};
use crate::dto::response::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/checklist?stashId=
pub async fn list_checklist(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ChecklistQuery>,
) -> Result<Json<Vec<ChecklistItem>>, ApiError> {
    let stash_id = query
        .stash_id
        .ok_or_else(|| AppError::validation("stashId is required"))?;
    let entries = state.checklist_service.list(&auth, stash_id).await?;
    Ok(Json(entries))
}

/// POST /api/checklist
pub async fn create_checklist_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateChecklistRequest>,
) -> Result<(StatusCode, Json<ChecklistItem>), ApiError> {
    let entry = state
        .checklist_service
        .create(&auth, req.stash_id, &req.name, req.category)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /api/checklist/{id}
pub async fn update_checklist_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateChecklistRequest>,
) -> Result<Json<ChecklistItem>, ApiError> {
    let entry = state
        .checklist_service
        .update(
            &auth,
            id,
            ChecklistUpdate {
                is_checked: req.is_checked,
                linked_item_id: req.linked_item_id,
            },
        )
        .await?;
    Ok(Json(entry))
}

/// DELETE /api/checklist/{id}
pub async fn delete_checklist_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.checklist_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
