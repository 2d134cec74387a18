//! HTTP request handlers, one module per domain.

pub mod ai;
pub mod auth;
pub mod checklist;
pub mod cron;
pub mod health;
pub mod invitation;
pub mod item;
pub mod photo;
pub mod push;
pub mod service_worker;
pub mod stash;
