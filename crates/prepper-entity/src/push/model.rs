//! Push subscription row and the payload delivered to the service worker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A browser push endpoint registered by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    /// Row identifier.
    pub id: Uuid,
    /// Subscribing user.
    pub user_id: Uuid,
    /// Push service endpoint URL (unique).
    pub endpoint: String,
    /// Client public key, URL-safe base64.
    pub p256dh: String,
    /// Client auth secret, URL-safe base64.
    pub auth: String,
    /// When the subscription was registered.
    pub created_at: DateTime<Utc>,
}

/// JSON payload read by `push-sw.js`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub require_interaction: bool,
}
