use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use momentum_domain::completion::{CompletionDate, CompletionLog};
use momentum_domain::project::{Phase, PhaseStatus, Project, ProjectStatus, WorkSchedule};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDto {
    pub id: String,
    pub name: String,
    pub status: PhaseStatus,
    pub position: u32,
    pub due_date: Option<CompletionDate>,
}

impl From<&Phase> for PhaseDto {
    fn from(phase: &Phase) -> Self {
        Self {
            id: phase.id().to_string(),
            name: phase.name().to_string(),
            status: phase.status(),
            position: phase.position(),
            due_date: phase.due_date(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvgDto {
    pub description: Option<String>,
    pub completed: bool,
    pub streak: u32,
    pub completion_history: CompletionLog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// Share of phases done, 0 to 1.
    pub progress: f64,
    pub phases: Vec<PhaseDto>,
    pub mvg: MvgDto,
    pub session_log: CompletionLog,
    pub schedule: Option<WorkSchedule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectDto {
    fn from(project: &Project) -> Self {
        let mvg = project.mvg();
        Self {
            id: project.id().to_string(),
            name: project.name().to_string(),
            description: project.description().map(str::to_string),
            status: project.status(),
            progress: project.progress(),
            phases: project.phases().iter().map(PhaseDto::from).collect(),
            mvg: MvgDto {
                description: mvg.description.clone(),
                completed: mvg.tracking.completed,
                streak: mvg.tracking.streak,
                completion_history: mvg.tracking.completion_history.clone(),
            },
            session_log: project.session_log().clone(),
            schedule: project.schedule().cloned(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSessionsDto {
    pub project_id: String,
    pub from: CompletionDate,
    pub to: CompletionDate,
    pub dates: Vec<CompletionDate>,
}
