//! Stash entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::MemberRole;

/// A household inventory shared between its members.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stash {
    /// Unique stash identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// When the stash was created.
    pub created_at: DateTime<Utc>,
    /// When the stash was last renamed.
    pub updated_at: DateTime<Utc>,
}

/// A stash as seen by one of its members in a listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StashSummary {
    /// Stash identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The caller's role in the stash.
    pub role: MemberRole,
    /// Number of members.
    pub member_count: i64,
    /// When the stash was created.
    pub created_at: DateTime<Utc>,
}
