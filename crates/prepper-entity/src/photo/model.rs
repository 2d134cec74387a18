//! Photo entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An image attached to an item. The bytes live in object storage under
/// `storage_key`; the row is removed together with its item.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Unique photo identifier.
    pub id: Uuid,
    /// The item the photo belongs to.
    pub item_id: Uuid,
    /// Object key inside the photo bucket.
    #[serde(skip_serializing)]
    pub storage_key: String,
    /// File name as uploaded.
    pub original_name: Option<String>,
    /// MIME type of the stored bytes.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Raw result of the last vision analysis.
    pub ai_analysis: Option<serde_json::Value>,
    /// When the photo was uploaded.
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Public URL under which the photo bytes are served.
    pub fn url(&self) -> String {
        format!("/api/photos/{}", self.id)
    }
}

/// Data required to record an uploaded photo.
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub item_id: Uuid,
    pub storage_key: String,
    pub original_name: Option<String>,
    pub mime_type: String,
    pub size: i64,
}
