//! Item CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use prepper_service::item::ItemView;

use crate::dto::request::{CreateItemRequest, ItemListQuery, UpdateItemRequest};
use crate::dto::response::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/items?stashId=&category=&search=&expiringSoon=
pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ItemListQuery>,
) -> Result<Json<Vec<ItemView>>, ApiError> {
    let items = state.item_service.list(&auth, query.into()).await?;
    Ok(Json(items))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemView>), ApiError> {
    let data = req.into_entity(auth.user_id)?;
    let item = state.item_service.create(&auth, data).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ItemView>, ApiError> {
    let item = state.item_service.get(&auth, id).await?;
    Ok(Json(item))
}

/// PATCH /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateItemRequest>,
) -> Result<Json<ItemView>, ApiError> {
    let item = state
        .item_service
        .update(&auth, id, req.into_entity()?)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.item_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
