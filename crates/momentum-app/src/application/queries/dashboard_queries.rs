use log::debug;
use std::sync::Arc;

use crate::application::dtos::{
    AtRiskHabitDto, DashboardDto, ProjectProgressDto, TodaySessionDto,
};
use momentum_domain::completion::{compute_streak, TrackableEntity};
use momentum_domain::habit::HabitRepository;
use momentum_domain::project::{ProjectRepository, ProjectStatus};
use momentum_domain::shared::{Clock, DomainError, UserId};

pub struct DashboardQueries {
    habit_repo: Arc<dyn HabitRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    clock: Arc<dyn Clock>,
}

impl DashboardQueries {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            habit_repo,
            project_repo,
            clock,
        }
    }

    /// Today's overview for one user. Completion is read from the histories,
    /// so the result does not depend on whether the daily reset has run yet.
    pub async fn summary(&self, user_id: &UserId) -> Result<DashboardDto, DomainError> {
        let today = self.clock.today();
        let habits = self.habit_repo.find_all_for_user(user_id).await?;
        let projects = self.project_repo.find_all_for_user(user_id).await?;

        let mut completed_today = 0;
        let mut best_current_streak = 0;
        let mut at_risk = Vec::new();

        for habit in &habits {
            let history = &habit.tracking().completion_history;
            if history.is_completed_on(today) {
                completed_today += 1;
            }
            best_current_streak = best_current_streak.max(compute_streak(history, today));
            if habit.is_at_risk(today) {
                at_risk.push(AtRiskHabitDto {
                    id: habit.id().to_string(),
                    name: habit.name().to_string(),
                    streak: habit.streak(),
                });
            }
        }

        let visible: Vec<_> = projects
            .iter()
            .filter(|p| p.status() != ProjectStatus::Archived)
            .collect();

        let project_progress = visible
            .iter()
            .map(|p| ProjectProgressDto {
                id: p.id().to_string(),
                name: p.name().to_string(),
                progress: p.progress(),
                mvg_completed: p.mvg().tracking.completion_history.is_completed_on(today),
                mvg_streak: p.mvg().tracking.streak,
            })
            .collect();

        let mut sessions_today: Vec<TodaySessionDto> = visible
            .iter()
            .filter(|p| p.has_session_on(today))
            .filter_map(|p| {
                p.schedule().map(|schedule| TodaySessionDto {
                    project_id: p.id().to_string(),
                    project_name: p.name().to_string(),
                    start_time: schedule.start_time().to_string(),
                    duration_minutes: schedule.duration_minutes(),
                    done: p.session_log().is_completed_on(today),
                })
            })
            .collect();
        sessions_today.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        debug!(
            "Dashboard for user {}: {} habits, {} projects, {} sessions today",
            user_id,
            habits.len(),
            visible.len(),
            sessions_today.len()
        );

        Ok(DashboardDto {
            date: today,
            habit_count: habits.len(),
            completed_today,
            at_risk,
            best_current_streak,
            projects: project_progress,
            sessions_today,
        })
    }
}
