use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

use momentum_domain::habit::HabitRepository;
use momentum_domain::project::ProjectRepository;
use momentum_domain::shared::{DomainError, UserId};
use momentum_domain::user::UserRepository;

/// Outcome of one sweep over every account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResetReport {
    pub users: usize,
    pub habits_reset: usize,
    pub projects_reset: usize,
    /// User ids whose reset failed.
    pub failures: Vec<String>,
}

/// Start-of-day reset for all users: clears `completed` on habits and
/// project goals, leaving streaks and histories as they are.
pub struct DailyResetService {
    user_repo: Arc<dyn UserRepository>,
    habit_repo: Arc<dyn HabitRepository>,
    project_repo: Arc<dyn ProjectRepository>,
}

impl DailyResetService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        habit_repo: Arc<dyn HabitRepository>,
        project_repo: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            user_repo,
            habit_repo,
            project_repo,
        }
    }

    /// Reset one user's habits and projects. Each kind is one UPDATE, so a
    /// toggle racing the sweep never loses its history record.
    pub async fn reset_user(&self, user_id: &UserId) -> Result<(usize, usize), DomainError> {
        let habits = self.habit_repo.reset_completed_for_user(user_id).await?;
        let projects = self.project_repo.reset_completed_for_user(user_id).await?;

        Ok((habits, projects))
    }

    /// A failure for one user is logged and recorded; the sweep continues.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> Result<DailyResetReport, DomainError> {
        let started = Instant::now();
        let user_ids = self.user_repo.find_all_ids().await?;

        let mut report = DailyResetReport {
            users: user_ids.len(),
            ..Default::default()
        };

        for user_id in &user_ids {
            match self.reset_user(user_id).await {
                Ok((habits, projects)) => {
                    report.habits_reset += habits;
                    report.projects_reset += projects;
                }
                Err(e) => {
                    error!("Daily reset failed for user {}: {}", user_id, e);
                    report.failures.push(user_id.to_string());
                }
            }
        }

        info!(
            "Daily reset finished in {}ms: users={} habits={} projects={} failures={}",
            started.elapsed().as_millis(),
            report.users,
            report.habits_reset,
            report.projects_reset,
            report.failures.len()
        );
        Ok(report)
    }
}
