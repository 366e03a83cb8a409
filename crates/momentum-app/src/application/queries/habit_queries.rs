use log::info;
use std::sync::Arc;

use crate::application::dtos::{
    CalendarDto, HabitDto, StreakSummaryDto, TrendDto, WeeklySummaryDto,
};
use momentum_domain::analytics::{completion_trend, month_calendar, weekly_summary};
use momentum_domain::completion::{summarize, StreakPolicy, TrackableEntity};
use momentum_domain::habit::{Habit, HabitRepository};
use momentum_domain::shared::{Clock, DomainError, HabitId, UserId};

pub struct HabitQueries {
    habit_repo: Arc<dyn HabitRepository>,
    clock: Arc<dyn Clock>,
}

impl HabitQueries {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { habit_repo, clock }
    }

    async fn load(&self, user_id: &UserId, habit_id: &HabitId) -> Result<Habit, DomainError> {
        self.habit_repo
            .find_by_id(user_id, habit_id)
            .await?
            .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))
    }

    pub async fn list(&self, user_id: &UserId) -> Result<Vec<HabitDto>, DomainError> {
        let today = self.clock.today();
        let habits = self.habit_repo.find_all_for_user(user_id).await?;
        Ok(habits
            .iter()
            .map(|h| HabitDto::from_habit(h, today))
            .collect())
    }

    pub async fn get(&self, user_id: &UserId, habit_id: &HabitId) -> Result<HabitDto, DomainError> {
        let habit = self.load(user_id, habit_id).await?;
        Ok(HabitDto::from_habit(&habit, self.clock.today()))
    }

    /// Current streak is recomputed as of today, so a habit left untouched
    /// for a while reports what the history supports rather than the stored value.
    pub async fn streak_summary(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<StreakSummaryDto, DomainError> {
        let habit = self.load(user_id, habit_id).await?;
        let summary = summarize(
            &habit.tracking().completion_history,
            self.clock.today(),
            StreakPolicy::Forgiving,
        );
        Ok(StreakSummaryDto::new(
            habit.id().to_string(),
            habit.name().to_string(),
            summary,
        ))
    }

    pub async fn calendar(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        year: i32,
        month: u32,
    ) -> Result<CalendarDto, DomainError> {
        let habit = self.load(user_id, habit_id).await?;
        let calendar = month_calendar(&habit.tracking().completion_history, year, month)?;

        info!(
            "[habits] calendar habit_id={} month={:04}-{:02} completed_days={}",
            habit_id, year, month, calendar.stats.completed_days
        );
        Ok(CalendarDto::new(habit.id().to_string(), calendar))
    }

    pub async fn trend(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        days: u32,
    ) -> Result<TrendDto, DomainError> {
        let habit = self.load(user_id, habit_id).await?;
        let today = self.clock.today();
        let points = completion_trend(&habit.tracking().completion_history, today, days)?;
        Ok(TrendDto::new(habit.id().to_string(), today, points))
    }

    pub async fn weekly_summary(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        weeks: u32,
    ) -> Result<WeeklySummaryDto, DomainError> {
        let habit = self.load(user_id, habit_id).await?;
        let summary = weekly_summary(
            &habit.tracking().completion_history,
            self.clock.today(),
            weeks,
        )?;
        Ok(WeeklySummaryDto::new(habit.id().to_string(), summary))
    }
}
