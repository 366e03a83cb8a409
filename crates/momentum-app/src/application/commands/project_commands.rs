use crate::application::commands::command_handler::Command;
use momentum_domain::completion::CompletionDate;
use momentum_domain::project::{PhaseStatus, ProjectStatus, WorkSchedule};
use momentum_domain::shared::{PhaseId, ProjectId, UserId};

#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub mvg_description: Option<String>,
}

impl Command for CreateProjectCommand {}

#[derive(Debug, Clone)]
pub struct UpdateProjectCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub mvg_description: Option<Option<String>>,
}

impl Command for UpdateProjectCommand {}

#[derive(Debug, Clone)]
pub struct DeleteProjectCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
}

impl Command for DeleteProjectCommand {}

#[derive(Debug, Clone)]
pub struct ToggleProjectMvgCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
}

impl Command for ToggleProjectMvgCommand {}

#[derive(Debug, Clone)]
pub struct ResetDailyMvgsCommand {
    pub user_id: UserId,
}

impl Command for ResetDailyMvgsCommand {}

#[derive(Debug, Clone)]
pub struct AddPhaseCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub name: String,
    pub due_date: Option<CompletionDate>,
}

impl Command for AddPhaseCommand {}

#[derive(Debug, Clone)]
pub struct UpdatePhaseCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub phase_id: PhaseId,
    pub name: Option<String>,
    pub status: Option<PhaseStatus>,
    pub position: Option<u32>,
    pub due_date: Option<Option<CompletionDate>>,
}

impl Command for UpdatePhaseCommand {}

#[derive(Debug, Clone)]
pub struct RemovePhaseCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub phase_id: PhaseId,
}

impl Command for RemovePhaseCommand {}

/// `date` defaults to today.
#[derive(Debug, Clone)]
pub struct RecordWorkSessionCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub date: Option<CompletionDate>,
    pub completed: bool,
    pub notes: Option<String>,
}

impl Command for RecordWorkSessionCommand {}

/// `schedule: None` clears the schedule.
#[derive(Debug, Clone)]
pub struct SetWorkScheduleCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub schedule: Option<WorkSchedule>,
}

impl Command for SetWorkScheduleCommand {}
