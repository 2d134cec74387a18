//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Password reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: i64,
    /// Stash invitation lifetime in days.
    #[serde(default = "default_invitation_ttl")]
    pub invitation_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            password_min_length: default_password_min(),
            reset_token_ttl_minutes: default_reset_ttl(),
            invitation_ttl_days: default_invitation_ttl(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    60 * 24 * 30
}

fn default_password_min() -> usize {
    6
}

fn default_reset_ttl() -> i64 {
    60
}

fn default_invitation_ttl() -> i64 {
    7
}
