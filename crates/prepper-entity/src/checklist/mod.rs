//! Preparedness checklist entities.

pub mod defaults;
pub mod model;

pub use defaults::{DEFAULT_CHECKLIST, DefaultChecklistEntry};
pub use model::{ChecklistItem, CreateChecklistItem};
