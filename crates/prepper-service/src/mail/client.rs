//! E-mail delivery through the Resend HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use prepper_core::config::MailConfig;
use prepper_core::error::AppError;
use prepper_core::result::AppResult;

/// A rendered message ready to hand to the delivery API.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail {
    /// Sender, e.g. `Prepperhjælper <noreply@raakode.dk>`.
    pub from: String,
    /// Recipients.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Sends e-mail. Callers decide whether a failure matters.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver one message.
    async fn send(&self, email: OutgoingEmail) -> AppResult<()>;
}

/// [`Mailer`] backed by Resend.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ResendMailer {
    /// Creates a mailer from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent("prepper-helper (+reqwest)")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build mail client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        if self.api_key.is_empty() {
            warn!(subject = %email.subject, "Mail API key not configured, e-mail not sent");
            return Err(AppError::service_unavailable("E-mail delivery is not configured"));
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await
            .map_err(|e| AppError::external(format!("Mail request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external(format!(
                "Mail API error: HTTP {status}: {body}"
            )));
        }

        debug!(to = ?email.to, subject = %email.subject, "E-mail sent");
        Ok(())
    }
}
