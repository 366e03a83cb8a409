use chrono::Local;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use super::daily_reset_service::DailyResetService;
use crate::application::utils::ResultExt;
use momentum_domain::shared::DomainError;

/// Runs [`DailyResetService::run_once`] on a cron schedule in server-local time.
pub struct DailyResetScheduler {
    scheduler: JobScheduler,
}

impl DailyResetScheduler {
    /// Six-field cron expression, seconds first (`0 0 0 * * *` is midnight).
    pub async fn start(cron: &str, service: Arc<DailyResetService>) -> Result<Self, DomainError> {
        let scheduler = JobScheduler::new().await.to_infra_err()?;

        let job = Job::new_async_tz(cron, Local, move |_id, _scheduler| {
            let service = Arc::clone(&service);
            Box::pin(async move {
                info!("Daily reset job triggered");
                if let Err(e) = service.run_once().await {
                    error!("Daily reset job failed: {}", e);
                }
            })
        })
        .map_err(|e| DomainError::Validation(format!("Invalid cron expression '{}': {}", cron, e)))?;

        scheduler.add(job).await.to_infra_err()?;
        scheduler.start().await.to_infra_err()?;

        info!("Daily reset scheduled with cron '{}'", cron);
        Ok(Self { scheduler })
    }

    pub async fn shutdown(mut self) -> Result<(), DomainError> {
        self.scheduler.shutdown().await.to_infra_err()?;
        info!("Daily reset scheduler stopped");
        Ok(())
    }
}
