mod auth_handlers;
mod habit_handlers;
mod project_handlers;

#[cfg(test)]
mod tests;

pub use auth_handlers::{LoginCommandHandler, RegisterUserCommandHandler};
pub use habit_handlers::{
    CreateHabitCommandHandler, DeleteHabitCommandHandler, ResetDailyHabitsCommandHandler,
    ToggleHabitCommandHandler, UpdateHabitCommandHandler,
};
pub use project_handlers::{
    AddPhaseCommandHandler, CreateProjectCommandHandler, DeleteProjectCommandHandler,
    RecordWorkSessionCommandHandler, RemovePhaseCommandHandler, ResetDailyMvgsCommandHandler,
    SetWorkScheduleCommandHandler, ToggleProjectMvgCommandHandler, UpdatePhaseCommandHandler,
    UpdateProjectCommandHandler,
};
