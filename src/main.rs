//! Prepper Helper server: household emergency-supply inventory.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use prepper_api::{AppState, Integrations, build_app};
use prepper_core::config::AppConfig;
use prepper_core::error::AppError;
use prepper_core::traits::storage::ObjectStorage;
use prepper_database::DatabasePool;
use prepper_database::migration::run_migrations;
use prepper_service::{AnthropicVision, ResendMailer, WebPushSender};
use prepper_storage::S3Storage;
use prepper_worker::{CronScheduler, ExpirationDigestJob};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("PREPPER_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("PREPPER_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Prepper Helper");

    // ── Step 1: Database connection + migrations ─────────────────
    let database = DatabasePool::connect(&config.database).await?;
    run_migrations(database.pool()).await?;

    // ── Step 2: Photo storage ────────────────────────────────────
    let s3 = S3Storage::new(&config.storage).await?;
    if config.storage.ensure_bucket {
        s3.ensure_bucket().await?;
    }
    let storage: Arc<dyn ObjectStorage> = Arc::new(s3);

    // ── Step 3: Outbound integrations ────────────────────────────
    if config.mail.api_key.is_empty() {
        tracing::warn!("Mail API key not set; invitation and reset e-mails are disabled");
    }
    if !config.push.is_configured() {
        tracing::warn!("VAPID keys not set; push notifications are disabled");
    }
    if config.ai.api_key.is_empty() {
        tracing::warn!("AI API key not set; photo analysis is disabled");
    }
    if config.cron.secret.is_empty() {
        tracing::warn!("Cron secret not set; cron endpoints reject every request");
    }

    let integrations = Integrations {
        storage,
        mailer: Arc::new(ResendMailer::new(&config.mail)?),
        push_sender: Arc::new(WebPushSender::new(&config.push)?),
        vision: Arc::new(AnthropicVision::new(&config.ai)?),
    };

    // ── Step 4: Services ─────────────────────────────────────────
    let state = AppState::new(config.clone(), database.pool().clone(), integrations);

    // ── Step 5: Scheduled notifications ──────────────────────────
    let mut scheduler = if config.worker.enabled && config.push.is_configured() {
        let scheduler = CronScheduler::new(config.worker.clone()).await?;
        scheduler
            .register_expiration_digest(ExpirationDigestJob::new(Arc::clone(&state.notifier)))
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Expiration digest scheduler disabled");
        None
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(%addr, "Prepper Helper listening");

    // ── Step 7: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Scheduler shutdown failed");
        }
    }
    database.close().await;

    tracing::info!("Prepper Helper shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
