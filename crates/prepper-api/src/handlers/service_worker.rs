//! The browser service worker that displays push messages.

use axum::http::header;
use axum::response::IntoResponse;

const PUSH_SERVICE_WORKER: &str = include_str!("../../static/push-sw.js");

/// GET /push-sw.js
pub async fn push_service_worker() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        PUSH_SERVICE_WORKER,
    )
}
