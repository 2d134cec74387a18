//! Web push subscription handlers.

use axum::Json;
use axum::extract::State;

use prepper_entity::push::PushSubscription;
use prepper_service::push::TestPushResult;

use crate::dto::request::{SubscribeRequest, UnsubscribeRequest};
use crate::dto::response::{SuccessResponse, VapidKeyResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// GET /api/push/vapid-public-key
pub async fn vapid_public_key(
    State(state): State<AppState>,
) -> Result<Json<VapidKeyResponse>, ApiError> {
    let public_key = state.push_service.vapid_public_key()?.to_string();
    Ok(Json(VapidKeyResponse { public_key }))
}

/// POST /api/push/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<SubscribeRequest>,
) -> Result<Json<PushSubscription>, ApiError> {
    validate_body(&req)?;
    let sub = state
        .push_service
        .subscribe(&auth, &req.endpoint, &req.keys.p256dh, &req.keys.auth)
        .await?;
    Ok(Json(sub))
}

/// DELETE /api/push/subscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UnsubscribeRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.push_service.unsubscribe(&auth, &req.endpoint).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/push/test
pub async fn send_test(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TestPushResult>, ApiError> {
    let result = state.push_service.send_test(&auth).await?;
    Ok(Json(result))
}
