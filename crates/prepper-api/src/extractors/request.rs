//! Body, path and query extractors whose rejections use the API error body.
//!
//! Axum's own extractors answer malformed input with plain-text 400/415/422
//! responses; these wrappers turn every rejection into a `VALIDATION_ERROR`.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use prepper_core::error::AppError;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

/// Typed query string.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

fn rejected(what: &str, detail: String) -> ApiError {
    ApiError(AppError::validation(format!("Invalid {what}: {detail}")))
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected("request body", rejection.body_text())),
        }
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected("path parameter", rejection.body_text())),
        }
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected("query string", rejection.body_text())),
        }
    }
}
