//! Subscription key encoding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use prepper_core::error::AppError;

/// Re-encode a browser subscription key as URL-safe base64 without padding.
///
/// Browsers hand out keys in either base64 alphabet, with or without
/// padding; the push encryption expects the URL-safe unpadded form.
pub fn normalize_key(key: &str) -> Result<String, AppError> {
    let normalized: String = key
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(AppError::validation("Subscription key is empty"));
    }
    URL_SAFE_NO_PAD
        .decode(&normalized)
        .map_err(|e| AppError::validation(format!("Invalid subscription key: {e}")))?;

    Ok(normalized)
}
