//! Preparedness checklist per stash.

pub mod service;

pub use service::{ChecklistService, ChecklistUpdate};
