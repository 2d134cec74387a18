//! Checklist entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::item::Category;

/// A recommended supply in a stash's checklist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Owning stash.
    pub stash_id: Uuid,
    /// Entry name; seeded entries carry a translation key.
    pub name: String,
    /// Supply category.
    pub category: Category,
    /// Whether the supply has been acquired.
    pub is_checked: bool,
    /// Whether the entry came from the seeded defaults.
    pub is_default: bool,
    /// Item that fulfils this entry, if linked.
    pub linked_item_id: Option<Uuid>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a checklist entry.
#[derive(Debug, Clone)]
pub struct CreateChecklistItem {
    pub stash_id: Uuid,
    pub name: String,
    pub category: Category,
    pub is_default: bool,
}
