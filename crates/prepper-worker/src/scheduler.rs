//! Cron scheduler for periodic tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use prepper_core::config::WorkerConfig;
use prepper_core::error::AppError;

use crate::jobs::ExpirationDigestJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Schedules from configuration
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, config })
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Expiration digest, daily by default at 09:00 UTC
    pub async fn register_expiration_digest(
        &self,
        digest: ExpirationDigestJob,
    ) -> Result<(), AppError> {
        let schedule = self.config.expiration_check_schedule.clone();
        let digest = Arc::new(digest);

        let job = CronJob::new_async(schedule.as_str(), move |_uuid, _lock| {
            let digest = Arc::clone(&digest);
            Box::pin(async move {
                match digest.run().await {
                    Ok(summary) => tracing::info!(
                        items_checked = summary.items_checked,
                        notifications_sent = summary.notifications_sent,
                        subscriptions_removed = summary.subscriptions_removed,
                        "Scheduled expiration digest completed"
                    ),
                    Err(e) => tracing::error!(error = %e, "Scheduled expiration digest failed"),
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create expiration_digest schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add expiration_digest schedule: {}", e))
        })?;

        tracing::info!(schedule = %schedule, "Registered: expiration_digest");
        Ok(())
    }
}
