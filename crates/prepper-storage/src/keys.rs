//! Object key layout for photos.

use std::fmt::Display;

/// Build the object key `{user}/{item}/{photo}.{ext}`.
///
/// The extension is taken from the uploaded file name when it has one made
/// of ASCII alphanumerics, otherwise `jpg`.
pub fn photo_key(
    user_id: impl Display,
    item_id: impl Display,
    photo_id: impl Display,
    file_name: Option<&str>,
) -> String {
    let ext = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "jpg".to_string());
    format!("{user_id}/{item_id}/{photo_id}.{ext}")
}
