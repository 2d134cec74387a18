//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::Category;
use super::expiration::ExpirationStatus;

/// A tracked supply unit inside a stash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique item identifier.
    pub id: Uuid,
    /// Owning stash.
    pub stash_id: Uuid,
    /// Member who registered the item.
    pub created_by: Option<Uuid>,
    /// Item name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Supply category.
    pub category: Category,
    /// Number of units, at least one.
    pub quantity: i32,
    /// Best-before date, if known.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Whether fields were filled from a photo analysis.
    pub ai_extracted: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Expiration status at `now`.
    pub fn expiration_status(&self, now: DateTime<Utc>) -> ExpirationStatus {
        ExpirationStatus::classify(self.expiration_date, now)
    }
}

/// Data required to create an item.
#[derive(Debug, Clone)]
pub struct CreateItem {
    /// Owning stash.
    pub stash_id: Uuid,
    /// Creating member.
    pub created_by: Uuid,
    /// Trimmed, non-empty name.
    pub name: String,
    /// Description (optional).
    pub description: Option<String>,
    /// Category.
    pub category: Category,
    /// Quantity, at least one.
    pub quantity: i32,
    /// Expiration date (optional).
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Partial update of an item. `None` leaves a field unchanged; the inner
/// `Option` of nullable fields distinguishes "clear" from "keep".
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Category>,
    pub quantity: Option<i32>,
    pub expiration_date: Option<Option<DateTime<Utc>>>,
    pub ai_extracted: Option<bool>,
}
