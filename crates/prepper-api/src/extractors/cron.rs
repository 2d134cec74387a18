//! Shared-secret guards for the externally triggered cron endpoints.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use prepper_service::{SecretSource, verify_cron_secret};

use crate::error::ApiError;
use crate::state::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// A scheduler presenting the secret as a bearer token or `x-api-key`.
#[derive(Debug, Clone, Copy)]
pub struct CronCaller;

/// A scheduler presenting the secret in `x-api-key`.
#[derive(Debug, Clone, Copy)]
pub struct CronApiKey;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn check(headers: &HeaderMap, state: &AppState, source: SecretSource) -> Result<(), ApiError> {
    verify_cron_secret(
        &state.config.cron.secret,
        header(headers, AUTHORIZATION.as_str()),
        header(headers, API_KEY_HEADER),
        source,
    )?;
    Ok(())
}

impl FromRequestParts<AppState> for CronCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check(&parts.headers, state, SecretSource::BearerOrApiKey)?;
        Ok(CronCaller)
    }
}

impl FromRequestParts<AppState> for CronApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check(&parts.headers, state, SecretSource::ApiKeyOnly)?;
        Ok(CronApiKey)
    }
}
