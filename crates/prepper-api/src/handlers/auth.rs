//! Auth handlers: register, login, password recovery, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use prepper_entity::user::User;
use prepper_service::auth::{LoginResult, RegisterRequest as NewAccount};

use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::dto::response::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .auth_service
        .register(NewAccount {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(result))
}

/// POST /api/auth/forgot-password
///
/// Answers the same way whether or not the address is registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .auth_service
        .forgot_password(&req.email, req.language())
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .auth_service
        .reset_password(&req.token, &req.password)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, ApiError> {
    let user = state.auth_service.me(&auth).await?;
    Ok(Json(user))
}
