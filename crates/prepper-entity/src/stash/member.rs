//! Stash membership rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::MemberRole;

/// Membership of a user in a stash. `(stash_id, user_id)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StashMember {
    /// Row identifier.
    pub id: Uuid,
    /// The stash.
    pub stash_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// The member's role.
    pub role: MemberRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// A member joined with the user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    /// Membership row identifier.
    pub id: Uuid,
    /// The member's user id.
    pub user_id: Uuid,
    /// Display name.
    pub name: Option<String>,
    /// E-mail address.
    pub email: String,
    /// Role inside the stash.
    pub role: MemberRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}
