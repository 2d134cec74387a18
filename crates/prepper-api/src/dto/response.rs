//! Response DTOs for API endpoints.

use serde::Serialize;

use prepper_service::NotificationSummary;

/// `{ "success": true }`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// GET /api/push/vapid-public-key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VapidKeyResponse {
    pub public_key: String,
}

/// Result of a cron-triggered notification run.
#[derive(Debug, Clone, Serialize)]
pub struct CronRunResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: NotificationSummary,
}
