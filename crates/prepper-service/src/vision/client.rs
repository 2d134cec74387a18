//! Vision model client for the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use prepper_core::config::AiConfig;
use prepper_core::error::AppError;
use prepper_core::result::AppResult;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A base64-encoded image with its media type.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub base64: String,
    pub media_type: String,
}

/// A model that answers a text prompt about one or more images.
#[async_trait]
pub trait VisionModel: Send + Sync + std::fmt::Debug + 'static {
    /// Return the model's text reply.
    async fn complete(&self, images: &[ImageInput], prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// [`VisionModel`] calling Claude over HTTP.
#[derive(Debug, Clone)]
pub struct AnthropicVision {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicVision {
    /// Creates a client from configuration.
    pub fn new(config: &AiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build AI client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl VisionModel for AnthropicVision {
    async fn complete(&self, images: &[ImageInput], prompt: &str) -> AppResult<String> {
        if self.api_key.is_empty() {
            return Err(AppError::service_unavailable("AI analysis is not configured"));
        }

        let mut content: Vec<serde_json::Value> = images
            .iter()
            .map(|image| {
                json!({
                    "type": "image",
                    "source": {
                        "type": "base64",
                        "media_type": image.media_type,
                        "data": image.base64,
                    }
                })
            })
            .collect();
        content.push(json!({ "type": "text", "text": prompt }));

        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": content }],
        });

        info!(model = %self.model, images = images.len(), "Sending vision request");

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external(format!("AI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::external(format!("AI API error: HTTP {status}: {text}")));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::external(format!("Invalid AI response: {e}")))?;
        debug!(stop_reason = ?parsed.stop_reason, blocks = parsed.content.len(), "Vision response received");

        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| AppError::external("No text response from AI"))
    }
}
