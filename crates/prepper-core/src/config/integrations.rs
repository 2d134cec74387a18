//! Outbound integration settings: e-mail, web push, vision model, cron.

use serde::{Deserialize, Serialize};

/// Transactional e-mail (Resend HTTP API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// API endpoint for sending e-mail.
    #[serde(default = "default_mail_api_url")]
    pub api_url: String,
    /// API key; empty disables sending.
    #[serde(default)]
    pub api_key: String,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from: String,
    /// Public base URL used to build links in e-mails.
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: default_mail_api_url(),
            api_key: String::new(),
            from: default_from(),
            app_url: default_app_url(),
        }
    }
}

/// VAPID key pair for web push.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// URL-safe base64 uncompressed P-256 public key, handed to browsers.
    #[serde(default)]
    pub vapid_public_key: String,
    /// URL-safe base64 raw P-256 private key.
    #[serde(default)]
    pub vapid_private_key: String,
    /// Contact URI placed in the VAPID `sub` claim.
    #[serde(default = "default_vapid_subject")]
    pub vapid_subject: String,
    /// Time-to-live for push messages in seconds.
    #[serde(default = "default_push_ttl")]
    pub ttl_seconds: u32,
}

impl PushConfig {
    /// Whether both halves of the VAPID key pair are present.
    pub fn is_configured(&self) -> bool {
        !self.vapid_public_key.is_empty() && !self.vapid_private_key.is_empty()
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            vapid_public_key: String::new(),
            vapid_private_key: String::new(),
            vapid_subject: default_vapid_subject(),
            ttl_seconds: default_push_ttl(),
        }
    }
}

/// Vision model (Anthropic Messages API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Messages endpoint.
    #[serde(default = "default_ai_api_url")]
    pub api_url: String,
    /// API key; empty disables analysis.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: default_ai_api_url(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_ai_timeout(),
        }
    }
}

/// Shared secret for externally triggered cron endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CronConfig {
    /// Empty rejects every trigger.
    #[serde(default)]
    pub secret: String,
}

fn default_mail_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_from() -> String {
    "Prepperhjælper <noreply@raakode.dk>".to_string()
}

fn default_app_url() -> String {
    "https://prep.raakode.dk".to_string()
}

fn default_vapid_subject() -> String {
    "mailto:admin@prep.raakode.dk".to_string()
}

fn default_push_ttl() -> u32 {
    24 * 60 * 60
}

fn default_ai_api_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_model() -> String {
    "claude-haiku-4-5".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_ai_timeout() -> u64 {
    60
}
