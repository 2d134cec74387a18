//! Externally triggered notification runs.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::CronRunResponse;
use crate::error::ApiError;
use crate::extractors::{CronApiKey, CronCaller};
use crate::state::AppState;

/// GET /api/cron/check-expiring
///
/// The daily digest; the secret may be a bearer token or `x-api-key`.
pub async fn check_expiring(
    State(state): State<AppState>,
    _caller: CronCaller,
) -> Result<Json<CronRunResponse>, ApiError> {
    let summary = state.notifier.run_digest(Utc::now()).await?;
    Ok(Json(CronRunResponse {
        success: true,
        summary,
    }))
}

/// POST /api/push/check-expiring
///
/// Per-item alerts on the threshold days; `x-api-key` only.
pub async fn check_expiring_thresholds(
    State(state): State<AppState>,
    _caller: CronApiKey,
) -> Result<Json<CronRunResponse>, ApiError> {
    let summary = state.notifier.run_threshold_alerts(Utc::now()).await?;
    Ok(Json(CronRunResponse {
        success: true,
        summary,
    }))
}
