//! Stash invitations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of an invitation. Only `Pending` may transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    /// Awaiting a response.
    Pending,
    /// Accepted; a membership row exists.
    Accepted,
    /// Declined by the invitee.
    Declined,
    /// Answered after its expiry.
    Expired,
}

/// An invitation to join a stash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    /// Unique invitation identifier.
    pub id: Uuid,
    /// The stash to join.
    pub stash_id: Uuid,
    /// Invited address, lowercased.
    pub email: Option<String>,
    /// Invited account, when the address belongs to a registered user.
    pub user_id: Option<Uuid>,
    /// Member who sent the invitation.
    pub invited_by: Uuid,
    /// Current status.
    pub status: InvitationStatus,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
    /// When the invitation stops being acceptable.
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Whether the invitation is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Whether the invitation targets the given account or its address.
    pub fn is_addressed_to(&self, user_id: Uuid, email: &str) -> bool {
        self.user_id == Some(user_id)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(email))
    }
}

/// The resolved recipient of a new invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationTarget {
    /// Address the invitation e-mail goes to.
    pub email: Option<String>,
    /// Registered account the invitation is bound to.
    pub user_id: Option<Uuid>,
}

/// An invitation enriched with stash and inviter names, for the invitee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDetails {
    /// Invitation identifier.
    pub id: Uuid,
    /// The stash to join.
    pub stash_id: Uuid,
    /// Stash name.
    pub stash_name: String,
    /// Inviter display name.
    pub invited_by_name: Option<String>,
    /// Current status.
    pub status: InvitationStatus,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
    /// When the invitation stops being acceptable.
    pub expires_at: DateTime<Utc>,
}
