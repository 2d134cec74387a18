//! # prepper-api
//!
//! HTTP API layer for Prepper Helper built on Axum.
//!
//! Provides all REST endpoints, the push service worker script, CORS and
//! tracing middleware, extractors, DTOs, and the mapping from `AppError`
//! to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::{AppState, Integrations};
