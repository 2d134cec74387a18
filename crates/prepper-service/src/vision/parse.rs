//! Extraction of the JSON record from free-form model output.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;

use prepper_core::error::AppError;

/// Fields the model is asked to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
}

/// Models answer `null` for fields they cannot read.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Strip Markdown fencing and surrounding prose from a model reply.
pub fn extract_json(text: &str) -> &str {
    let mut json = text.trim();

    if let Some(start) = json.find("```") {
        let after = &json[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            json = after[..end].trim();
        }
    }

    if !json.starts_with('{') {
        if let (Some(start), Some(end)) = (json.find('{'), json.rfind('}')) {
            if start < end {
                json = &json[start..=end];
            }
        }
    }

    json
}

/// Parse a model reply into an [`AnalysisResult`].
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::external("No text response from AI"));
    }

    let json = extract_json(text);
    serde_json::from_str(json).map_err(|e| {
        error!(error = %e, raw = %text, "Failed to parse AI response");
        AppError::external("Failed to parse AI response as JSON")
    })
}
