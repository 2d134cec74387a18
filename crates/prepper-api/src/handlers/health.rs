//! Health check handler.

use axum::Json;
use axum::extract::State;

use prepper_database::connection::health_check;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Always 200; the `database` field reports reachability.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match health_check(&state.db_pool).await {
        Ok(true) => "connected",
        Ok(false) => "degraded",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
