//! Daily push digest of expiring items.

use std::sync::Arc;

use chrono::Utc;
use tracing;

use prepper_core::error::ErrorKind;
use prepper_service::{ExpirationNotifier, NotificationSummary};

use crate::error::JobExecutionError;

/// Runs the expiration digest for all stashes.
#[derive(Debug, Clone)]
pub struct ExpirationDigestJob {
    /// Notifier doing the actual work
    notifier: Arc<ExpirationNotifier>,
}

impl ExpirationDigestJob {
    /// Create a new digest job
    pub fn new(notifier: Arc<ExpirationNotifier>) -> Self {
        Self { notifier }
    }

    /// Run once
    pub async fn run(&self) -> Result<NotificationSummary, JobExecutionError> {
        tracing::info!("Running expiration digest");

        self.notifier
            .run_digest(Utc::now())
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Database => {
                    JobExecutionError::Transient(format!("Expiration digest failed: {}", e))
                }
                _ => JobExecutionError::Internal(e),
            })
    }
}
