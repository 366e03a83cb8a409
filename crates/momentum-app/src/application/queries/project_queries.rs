use std::sync::Arc;

use crate::application::dtos::{ProjectDto, ScheduledSessionsDto};
use momentum_domain::completion::CompletionDate;
use momentum_domain::project::{Project, ProjectRepository, ProjectStatus};
use momentum_domain::shared::{DomainError, ProjectId, UserId};

pub struct ProjectQueries {
    project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectQueries {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repo }
    }

    async fn load(&self, user_id: &UserId, project_id: &ProjectId) -> Result<Project, DomainError> {
        self.project_repo
            .find_by_id(user_id, project_id)
            .await?
            .ok_or_else(|| DomainError::ProjectNotFound(project_id.to_string()))
    }

    pub async fn list(&self, user_id: &UserId) -> Result<Vec<ProjectDto>, DomainError> {
        let projects = self.project_repo.find_all_for_user(user_id).await?;
        Ok(projects.iter().map(ProjectDto::from).collect())
    }

    pub async fn get(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<ProjectDto, DomainError> {
        let project = self.load(user_id, project_id).await?;
        Ok(ProjectDto::from(&project))
    }

    /// Dates in `[from, to]` with a scheduled work session. Empty when the
    /// project has no schedule or is not active.
    pub async fn scheduled_sessions(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
        from: CompletionDate,
        to: CompletionDate,
    ) -> Result<ScheduledSessionsDto, DomainError> {
        let project = self.load(user_id, project_id).await?;

        let dates = match project.schedule() {
            Some(schedule) => schedule.sessions_between(from, to)?,
            None => Vec::new(),
        };
        let dates = if project.status() == ProjectStatus::Active {
            dates
        } else {
            Vec::new()
        };

        Ok(ScheduledSessionsDto {
            project_id: project.id().to_string(),
            from,
            to,
            dates,
        })
    }
}
