//! Password reset token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single-use token allowing a user to set a new password.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PasswordResetToken {
    /// Row identifier.
    pub id: Uuid,
    /// Random hex token sent by e-mail.
    pub token: String,
    /// The user whose password may be reset.
    pub user_id: Uuid,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Whether the token is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
