//! Custom Axum extractors.

pub mod auth;
pub mod cron;
pub mod request;

pub use auth::AuthUser;
pub use cron::{CronApiKey, CronCaller};
pub use request::{ApiJson, ApiPath, ApiQuery};
