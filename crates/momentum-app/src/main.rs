use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;

use momentum_app::application::services::DailyResetScheduler;
use momentum_app::presentation::{build_app_state, build_router};
use momentum_infrastructure::logging::init_logger;
use momentum_infrastructure::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Invalid configuration")?;

    match init_logger(&config.log_dir) {
        Ok(_) => {
            tracing::info!("🚀 Momentum starting...");
            tracing::info!("📝 File logging initialized at: {}", config.log_dir.display());
        }
        Err(e) => {
            eprintln!("⚠️  Failed to initialize file logging: {}", e);
            eprintln!("   Falling back to console logging only");

            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .try_init();
        }
    }

    let state = Arc::new(
        build_app_state(&config)
            .await
            .context("Failed to initialize application state")?,
    );
    tracing::info!("✅ App state initialized successfully");

    let scheduler = match &config.daily_reset_cron {
        Some(cron) => Some(
            DailyResetScheduler::start(cron, state.services.daily_reset.clone())
                .await
                .context("Failed to start daily reset scheduler")?,
        ),
        None => {
            tracing::warn!("Daily reset job disabled");
            None
        }
    };

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(scheduler) = scheduler {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Failed to stop daily reset scheduler: {}", e);
        }
    }
    state.runtime.db.close().await;
    tracing::info!("👋 Momentum stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
