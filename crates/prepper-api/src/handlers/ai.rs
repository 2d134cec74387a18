//! Vision analysis handler.

use axum::Json;
use axum::extract::State;

use prepper_service::vision::AnalysisResult;

use crate::dto::request::AnalyzeRequest;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/ai/analyze
pub async fn analyze(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state
        .analysis_service
        .analyze(&auth, req.into_service())
        .await?;
    Ok(Json(result))
}
