use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use crate::application::dtos::{HabitDto, ResetResultDto};
use momentum_domain::completion::toggle;
use momentum_domain::habit::{Habit, HabitRepository};
use momentum_domain::shared::{Clock, DomainError, HabitId, UserId};

async fn load_habit(
    repo: &dyn HabitRepository,
    user_id: &UserId,
    habit_id: &HabitId,
) -> Result<Habit, DomainError> {
    repo.find_by_id(user_id, habit_id)
        .await?
        .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))
}

pub struct CreateHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { habit_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<CreateHabitCommand> for CreateHabitCommandHandler {
    type Result = HabitDto;

    async fn handle(&self, cmd: CreateHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CreateHabitCommand for user: {}", cmd.user_id);

        let habit = Habit::new(cmd.user_id, cmd.name, cmd.description)?;
        self.habit_repo.save(&habit).await?;

        info!("Habit created: {} ({})", habit.name(), habit.id());
        Ok(HabitDto::from_habit(&habit, self.clock.today()))
    }
}

pub struct UpdateHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { habit_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<UpdateHabitCommand> for UpdateHabitCommandHandler {
    type Result = HabitDto;

    async fn handle(&self, cmd: UpdateHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling UpdateHabitCommand for habit: {}", cmd.habit_id);

        let mut habit = load_habit(self.habit_repo.as_ref(), &cmd.user_id, &cmd.habit_id).await?;

        if let Some(name) = cmd.name {
            habit.rename(name)?;
        }
        if let Some(description) = cmd.description {
            habit.update_description(description);
        }

        self.habit_repo.save(&habit).await?;
        Ok(HabitDto::from_habit(&habit, self.clock.today()))
    }
}

pub struct DeleteHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
}

impl DeleteHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>) -> Self {
        Self { habit_repo }
    }
}

#[async_trait]
impl CommandHandler<DeleteHabitCommand> for DeleteHabitCommandHandler {
    type Result = ();

    async fn handle(&self, cmd: DeleteHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling DeleteHabitCommand for habit: {}", cmd.habit_id);

        if !self.habit_repo.delete(&cmd.user_id, &cmd.habit_id).await? {
            return Err(DomainError::HabitNotFound(cmd.habit_id.to_string()));
        }
        Ok(())
    }
}

/// Load, toggle against today, save once.
pub struct ToggleHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    clock: Arc<dyn Clock>,
}

impl ToggleHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { habit_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<ToggleHabitCommand> for ToggleHabitCommandHandler {
    type Result = HabitDto;

    async fn handle(&self, cmd: ToggleHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling ToggleHabitCommand for habit: {}", cmd.habit_id);

        let habit = load_habit(self.habit_repo.as_ref(), &cmd.user_id, &cmd.habit_id).await?;
        let today = self.clock.today();

        let habit = toggle(habit, today);
        self.habit_repo.save(&habit).await?;

        info!(
            "Habit {} toggled on {}: completed={}, streak={}",
            habit.id(),
            today,
            habit.is_completed(),
            habit.streak()
        );
        Ok(HabitDto::from_habit(&habit, today))
    }
}

pub struct ResetDailyHabitsCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
}

impl ResetDailyHabitsCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>) -> Self {
        Self { habit_repo }
    }
}

#[async_trait]
impl CommandHandler<ResetDailyHabitsCommand> for ResetDailyHabitsCommandHandler {
    type Result = ResetResultDto;

    async fn handle(&self, cmd: ResetDailyHabitsCommand) -> Result<Self::Result, DomainError> {
        info!("Handling ResetDailyHabitsCommand for user: {}", cmd.user_id);

        let reset_count = self.habit_repo.reset_completed_for_user(&cmd.user_id).await?;

        Ok(ResetResultDto { reset_count })
    }
}
