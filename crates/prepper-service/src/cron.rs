//! Shared-secret check for externally triggered cron endpoints.

use prepper_core::error::AppError;

/// Which headers may carry the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// `Authorization: Bearer <secret>` or `x-api-key: <secret>`.
    BearerOrApiKey,
    /// `x-api-key: <secret>` only.
    ApiKeyOnly,
}

/// Check presented header values against the configured secret.
///
/// An empty configured secret rejects every caller.
pub fn verify_cron_secret(
    configured: &str,
    authorization: Option<&str>,
    api_key: Option<&str>,
    source: SecretSource,
) -> Result<(), AppError> {
    let unauthorized = || AppError::authentication("Unauthorized");
    if configured.is_empty() {
        return Err(unauthorized());
    }

    let bearer = match source {
        SecretSource::BearerOrApiKey => authorization.and_then(|h| h.strip_prefix("Bearer ")),
        SecretSource::ApiKeyOnly => None,
    };

    let matches = [bearer, api_key]
        .into_iter()
        .flatten()
        .any(|presented| constant_time_eq(presented.as_bytes(), configured.as_bytes()));

    if matches { Ok(()) } else { Err(unauthorized()) }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
