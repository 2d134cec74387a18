//! # prepper-entity
//!
//! Domain entity models for Prepper Helper. Every struct in this crate is
//! either a database row (deriving `sqlx::FromRow`) or a domain value such
//! as the expiration status of an item. Rows serialize in camelCase because
//! the HTTP API returns them as-is.

pub mod checklist;
pub mod item;
pub mod photo;
pub mod push;
pub mod stash;
pub mod user;
