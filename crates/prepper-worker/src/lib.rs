//! Scheduled background tasks for Prepper Helper.
//!
//! This crate provides:
//! - A cron scheduler that owns the periodic tasks
//! - The daily expiration digest job

pub mod error;
pub mod jobs;
pub mod scheduler;

pub use error::JobExecutionError;
pub use jobs::ExpirationDigestJob;
pub use scheduler::CronScheduler;
