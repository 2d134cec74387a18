//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the in-process scheduler runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression for the daily expiration check (UTC).
    #[serde(default = "default_expiration_schedule")]
    pub expiration_check_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expiration_check_schedule: default_expiration_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_expiration_schedule() -> String {
    "0 0 9 * * *".to_string()
}
