use crate::application::commands::command_handler::Command;
use momentum_domain::shared::{HabitId, UserId};

#[derive(Debug, Clone)]
pub struct CreateHabitCommand {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
}

impl Command for CreateHabitCommand {}

/// Absent fields are left unchanged. `description: Some(None)` clears it.
#[derive(Debug, Clone)]
pub struct UpdateHabitCommand {
    pub user_id: UserId,
    pub habit_id: HabitId,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl Command for UpdateHabitCommand {}

#[derive(Debug, Clone)]
pub struct DeleteHabitCommand {
    pub user_id: UserId,
    pub habit_id: HabitId,
}

impl Command for DeleteHabitCommand {}

/// Flip today's completion.
#[derive(Debug, Clone)]
pub struct ToggleHabitCommand {
    pub user_id: UserId,
    pub habit_id: HabitId,
}

impl Command for ToggleHabitCommand {}

#[derive(Debug, Clone)]
pub struct ResetDailyHabitsCommand {
    pub user_id: UserId,
}

impl Command for ResetDailyHabitsCommand {}
