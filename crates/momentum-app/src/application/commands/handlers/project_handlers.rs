use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::project_commands::*;
use crate::application::dtos::{ProjectDto, ResetResultDto};
use momentum_domain::project::{PhaseChanges, Project, ProjectRepository};
use momentum_domain::shared::{Clock, DomainError, ProjectId, UserId};

async fn load_project(
    repo: &dyn ProjectRepository,
    user_id: &UserId,
    project_id: &ProjectId,
) -> Result<Project, DomainError> {
    repo.find_by_id(user_id, project_id)
        .await?
        .ok_or_else(|| DomainError::ProjectNotFound(project_id.to_string()))
}

pub struct CreateProjectCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl CreateProjectCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<CreateProjectCommand> for CreateProjectCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: CreateProjectCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CreateProjectCommand for user: {}", cmd.user_id);

        let project = Project::new(cmd.user_id, cmd.name, cmd.description, cmd.mvg_description)?;
        self.project_repo.save(&project).await?;

        info!("Project created: {} ({})", project.name(), project.id());
        Ok(ProjectDto::from(&project))
    }
}

pub struct UpdateProjectCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl UpdateProjectCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<UpdateProjectCommand> for UpdateProjectCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: UpdateProjectCommand) -> Result<Self::Result, DomainError> {
        info!("Handling UpdateProjectCommand for project: {}", cmd.project_id);

        let mut project =
            load_project(self.project_repo.as_ref(), &cmd.user_id, &cmd.project_id).await?;

        if let Some(name) = cmd.name {
            project.rename(name)?;
        }
        if let Some(description) = cmd.description {
            project.update_description(description);
        }
        if let Some(status) = cmd.status {
            project.set_status(status);
        }
        if let Some(mvg_description) = cmd.mvg_description {
            project.update_mvg_description(mvg_description);
        }

        self.project_repo.save(&project).await?;
        Ok(ProjectDto::from(&project))
    }
}

pub struct DeleteProjectCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl DeleteProjectCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<DeleteProjectCommand> for DeleteProjectCommandHandler {
    type Result = ();

    async fn handle(&self, cmd: DeleteProjectCommand) -> Result<Self::Result, DomainError> {
        info!("Handling DeleteProjectCommand for project: {}", cmd.project_id);

        if !self
            .project_repo
            .delete(&cmd.user_id, &cmd.project_id)
            .await?
        {
            return Err(DomainError::ProjectNotFound(cmd.project_id.to_string()));
        }
        Ok(())
    }
}

pub struct ToggleProjectMvgCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
    clock: Arc<dyn Clock>,
}

impl ToggleProjectMvgCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            project_repo,
            clock,
        }
    }
}

#[async_trait]
impl CommandHandler<ToggleProjectMvgCommand> for ToggleProjectMvgCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: ToggleProjectMvgCommand) -> Result<Self::Result, DomainError> {
        info!("Handling ToggleProjectMvgCommand for project: {}", cmd.project_id);

        let project =
            load_project(self.project_repo.as_ref(), &cmd.user_id, &cmd.project_id).await?;
        let today = self.clock.today();

        let project = project.toggle_mvg(today);
        self.project_repo.save(&project).await?;

        info!(
            "Project {} MVG toggled on {}: completed={}, streak={}",
            project.id(),
            today,
            project.mvg().tracking.completed,
            project.mvg().tracking.streak
        );
        Ok(ProjectDto::from(&project))
    }
}

pub struct ResetDailyMvgsCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl ResetDailyMvgsCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<ResetDailyMvgsCommand> for ResetDailyMvgsCommandHandler {
    type Result = ResetResultDto;

    async fn handle(&self, cmd: ResetDailyMvgsCommand) -> Result<Self::Result, DomainError> {
        info!("Handling ResetDailyMvgsCommand for user: {}", cmd.user_id);

        let reset_count = self
            .project_repo
            .reset_completed_for_user(&cmd.user_id)
            .await?;

        Ok(ResetResultDto { reset_count })
    }
}

pub struct AddPhaseCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl AddPhaseCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<AddPhaseCommand> for AddPhaseCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: AddPhaseCommand) -> Result<Self::Result, DomainError> {
        info!("Handling AddPhaseCommand for project: {}", cmd.project_id);

        let mut project =
            load_project(self.project_repo.as_ref(), &cmd.user_id, &cmd.project_id).await?;
        project.add_phase(cmd.name, cmd.due_date)?;

        self.project_repo.save(&project).await?;
        Ok(ProjectDto::from(&project))
    }
}

pub struct UpdatePhaseCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl UpdatePhaseCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<UpdatePhaseCommand> for UpdatePhaseCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: UpdatePhaseCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling UpdatePhaseCommand for phase {} of project {}",
            cmd.phase_id, cmd.project_id
        );

        let mut project =
            load_project(self.project_repo.as_ref(), &cmd.user_id, &cmd.project_id).await?;
        project.update_phase(
            &cmd.phase_id,
            PhaseChanges {
                name: cmd.name,
                status: cmd.status,
                position: cmd.position,
                due_date: cmd.due_date,
            },
        )?;

        self.project_repo.save(&project).await?;
        Ok(ProjectDto::from(&project))
    }
}

pub struct RemovePhaseCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl RemovePhaseCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<RemovePhaseCommand> for RemovePhaseCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: RemovePhaseCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling RemovePhaseCommand for phase {} of project {}",
            cmd.phase_id, cmd.project_id
        );

        let mut project =
            load_project(self.project_repo.as_ref(), &cmd.user_id, &cmd.project_id).await?;
        project.remove_phase(&cmd.phase_id)?;

        self.project_repo.save(&project).await?;
        Ok(ProjectDto::from(&project))
    }
}

pub struct RecordWorkSessionCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
    clock: Arc<dyn Clock>,
}

impl RecordWorkSessionCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            project_repo,
            clock,
        }
    }
}

#[async_trait]
impl CommandHandler<RecordWorkSessionCommand> for RecordWorkSessionCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: RecordWorkSessionCommand) -> Result<Self::Result, DomainError> {
        let date = cmd.date.unwrap_or_else(|| self.clock.today());
        info!(
            "Handling RecordWorkSessionCommand for project {} on {}",
            cmd.project_id, date
        );

        let mut project =
            load_project(self.project_repo.as_ref(), &cmd.user_id, &cmd.project_id).await?;
        project.record_work_session(date, cmd.completed, cmd.notes);

        self.project_repo.save(&project).await?;
        Ok(ProjectDto::from(&project))
    }
}

pub struct SetWorkScheduleCommandHandler {
    project_repo: Arc<dyn ProjectRepository>,
}

impl SetWorkScheduleCommandHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }
}

#[async_trait]
impl CommandHandler<SetWorkScheduleCommand> for SetWorkScheduleCommandHandler {
    type Result = ProjectDto;

    async fn handle(&self, cmd: SetWorkScheduleCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling SetWorkScheduleCommand for project: {} (clear={})",
            cmd.project_id,
            cmd.schedule.is_none()
        );

        let mut project =
            load_project(self.project_repo.as_ref(), &cmd.user_id, &cmd.project_id).await?;
        project.set_schedule(cmd.schedule);

        self.project_repo.save(&project).await?;
        Ok(ProjectDto::from(&project))
    }
}
