//! Push message delivery with VAPID signing and aes128gcm encryption.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use web_push::request_builder::build_request;
use web_push::{
    ContentEncoding, SubscriptionInfo, VapidSignatureBuilder, WebPushMessage,
    WebPushMessageBuilder,
};

use prepper_core::config::PushConfig;
use prepper_core::error::AppError;
use prepper_core::result::AppResult;
use prepper_entity::push::{PushMessage, PushSubscription};

/// Why a push message was not delivered.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The push service reports the subscription no longer exists.
    #[error("subscription is gone (HTTP {0})")]
    Gone(u16),
    /// Any other failure; the subscription is kept.
    #[error("push delivery failed: {0}")]
    Failed(String),
}

impl DeliveryError {
    /// Whether the subscription should be deleted.
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::Gone(_))
    }
}

/// Delivers one message to one browser subscription.
#[async_trait]
pub trait PushSender: Send + Sync + std::fmt::Debug + 'static {
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), DeliveryError>;
}

/// [`PushSender`] speaking the Web Push protocol over reqwest.
#[derive(Debug, Clone)]
pub struct WebPushSender {
    client: reqwest::Client,
    private_key: String,
    subject: String,
    ttl: u32,
}

impl WebPushSender {
    /// Creates a sender from the VAPID configuration.
    pub fn new(config: &PushConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build push client: {e}")))?;

        Ok(Self {
            client,
            private_key: config.vapid_private_key.clone(),
            subject: config.vapid_subject.clone(),
            ttl: config.ttl_seconds,
        })
    }

    fn build_message(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<WebPushMessage, DeliveryError> {
        let info = SubscriptionInfo::new(
            &subscription.endpoint,
            &subscription.p256dh,
            &subscription.auth,
        );

        let mut signature =
            VapidSignatureBuilder::from_base64(&self.private_key, web_push::URL_SAFE_NO_PAD, &info)
                .map_err(|e| DeliveryError::Failed(format!("invalid VAPID key: {e}")))?;
        signature.add_claim("sub", self.subject.as_str());
        let signature = signature
            .build()
            .map_err(|e| DeliveryError::Failed(format!("failed to sign: {e}")))?;

        let payload = serde_json::to_vec(message)
            .map_err(|e| DeliveryError::Failed(format!("failed to encode payload: {e}")))?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, &payload);
        builder.set_ttl(self.ttl);
        builder.set_vapid_signature(signature);
        builder
            .build()
            .map_err(|e| DeliveryError::Failed(format!("failed to encrypt: {e}")))
    }
}

#[async_trait]
impl PushSender for WebPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), DeliveryError> {
        if self.private_key.is_empty() {
            return Err(DeliveryError::Failed("VAPID keys are not configured".into()));
        }

        let push = self.build_message(subscription, message)?;
        let (parts, body) = build_request::<Vec<u8>>(push).into_parts();

        let mut outgoing = self.client.post(parts.uri.to_string()).body(body);
        for (name, value) in parts.headers.iter() {
            outgoing = outgoing.header(name.as_str(), value.as_bytes());
        }

        let response = outgoing
            .send()
            .await
            .map_err(|e| DeliveryError::Failed(e.to_string()))?;

        let status = response.status().as_u16();
        match status {
            200..=299 => {
                debug!(subscription_id = %subscription.id, status, "Push delivered");
                Ok(())
            }
            404 | 410 => Err(DeliveryError::Gone(status)),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(DeliveryError::Failed(format!("HTTP {status}: {body}")))
            }
        }
    }
}
