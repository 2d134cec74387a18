//! Application configuration schemas.
//!
//! Configuration is merged from `config/default.toml`, an optional
//! environment overlay and `PREPPER_*` environment variables, then
//! deserialized into [`AppConfig`].

pub mod app;
pub mod auth;
pub mod database;
pub mod integrations;
pub mod logging;
pub mod storage;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::integrations::{AiConfig, CronConfig, MailConfig, PushConfig};
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Photo object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Transactional e-mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Web push settings.
    #[serde(default)]
    pub push: PushConfig,
    /// Vision model settings.
    #[serde(default)]
    pub ai: AiConfig,
    /// Cron trigger settings.
    #[serde(default)]
    pub cron: CronConfig,
    /// Scheduled job settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Later sources override earlier ones: `config/default`, then
    /// `config/{env}`, then variables such as `PREPPER_DATABASE__URL`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration using an explicit base file path.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PREPPER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Build a configuration with defaults everywhere except the database URL.
    pub fn with_database_url(url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::new(url),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            mail: MailConfig::default(),
            push: PushConfig::default(),
            ai: AiConfig::default(),
            cron: CronConfig::default(),
            worker: WorkerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
