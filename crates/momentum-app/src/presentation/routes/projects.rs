use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use crate::application::commands::project_commands::*;
use crate::application::commands::CommandHandler;
use crate::application::dtos::{ProjectDto, ResetResultDto, ScheduledSessionsDto};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::ApiError;
use crate::presentation::state::SharedState;
use momentum_domain::completion::CompletionDate;
use momentum_domain::project::{PhaseStatus, ProjectStatus, WorkSchedule};
use momentum_domain::shared::{PhaseId, ProjectId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mvg_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub mvg_description: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPhaseRequest {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<CompletionDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhaseRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<PhaseStatus>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub due_date: Option<Option<CompletionDate>>,
}

fn default_completed() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RecordSessionRequest {
    #[serde(default)]
    pub date: Option<CompletionDate>,
    #[serde(default = "default_completed")]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `{"schedule": null}` clears the schedule.
#[derive(Debug, Deserialize)]
pub struct SetScheduleRequest {
    pub schedule: Option<WorkSchedule>,
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub from: CompletionDate,
    pub to: CompletionDate,
}

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/reset-daily", post(reset_daily))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/mvg/toggle", post(toggle_mvg))
        .route("/projects/{id}/phases", post(add_phase))
        .route(
            "/projects/{id}/phases/{phase_id}",
            put(update_phase).delete(remove_phase),
        )
        .route("/projects/{id}/sessions", post(record_session))
        .route("/projects/{id}/sessions/scheduled", get(scheduled_sessions))
        .route("/projects/{id}/schedule", put(set_schedule))
}

/// GET /api/projects
async fn list_projects(
    State(state): State<SharedState>,
    user: AuthUser,
) -> Result<Json<Vec<ProjectDto>>, ApiError> {
    Ok(Json(state.queries.project.list(&user.user_id).await?))
}

/// POST /api/projects
async fn create_project(
    State(state): State<SharedState>,
    user: AuthUser,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectDto>), ApiError> {
    let project = state
        .command_handlers
        .create_project
        .handle(CreateProjectCommand {
            user_id: user.user_id,
            name: body.name,
            description: body.description,
            mvg_description: body.mvg_description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// POST /api/projects/reset-daily
async fn reset_daily(
    State(state): State<SharedState>,
    user: AuthUser,
) -> Result<Json<ResetResultDto>, ApiError> {
    let result = state
        .command_handlers
        .reset_daily_mvgs
        .handle(ResetDailyMvgsCommand {
            user_id: user.user_id,
        })
        .await?;
    Ok(Json(result))
}

/// GET /api/projects/{id}
async fn get_project(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state
        .queries
        .project
        .get(&user.user_id, &ProjectId::from_string(&id))
        .await?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
async fn update_project(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state
        .command_handlers
        .update_project
        .handle(UpdateProjectCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
            name: body.name,
            description: body.description,
            status: body.status,
            mvg_description: body.mvg_description,
        })
        .await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
async fn delete_project(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .command_handlers
        .delete_project
        .handle(DeleteProjectCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/projects/{id}/mvg/toggle
async fn toggle_mvg(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state
        .command_handlers
        .toggle_project_mvg
        .handle(ToggleProjectMvgCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
        })
        .await?;
    Ok(Json(project))
}

/// POST /api/projects/{id}/phases
async fn add_phase(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<AddPhaseRequest>,
) -> Result<(StatusCode, Json<ProjectDto>), ApiError> {
    let project = state
        .command_handlers
        .add_phase
        .handle(AddPhaseCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
            name: body.name,
            due_date: body.due_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/{id}/phases/{phase_id}
async fn update_phase(
    State(state): State<SharedState>,
    user: AuthUser,
    Path((id, phase_id)): Path<(String, String)>,
    Json(body): Json<UpdatePhaseRequest>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state
        .command_handlers
        .update_phase
        .handle(UpdatePhaseCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
            phase_id: PhaseId::from_string(&phase_id),
            name: body.name,
            status: body.status,
            position: body.position,
            due_date: body.due_date,
        })
        .await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}/phases/{phase_id}
async fn remove_phase(
    State(state): State<SharedState>,
    user: AuthUser,
    Path((id, phase_id)): Path<(String, String)>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state
        .command_handlers
        .remove_phase
        .handle(RemovePhaseCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
            phase_id: PhaseId::from_string(&phase_id),
        })
        .await?;
    Ok(Json(project))
}

/// POST /api/projects/{id}/sessions
async fn record_session(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<RecordSessionRequest>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state
        .command_handlers
        .record_work_session
        .handle(RecordWorkSessionCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
            date: body.date,
            completed: body.completed,
            notes: body.notes,
        })
        .await?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}/schedule
async fn set_schedule(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<SetScheduleRequest>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state
        .command_handlers
        .set_work_schedule
        .handle(SetWorkScheduleCommand {
            user_id: user.user_id,
            project_id: ProjectId::from_string(&id),
            schedule: body.schedule,
        })
        .await?;
    Ok(Json(project))
}

/// GET /api/projects/{id}/sessions/scheduled?from&to
async fn scheduled_sessions(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(range): Query<RangeParams>,
) -> Result<Json<ScheduledSessionsDto>, ApiError> {
    let sessions = state
        .queries
        .project
        .scheduled_sessions(
            &user.user_id,
            &ProjectId::from_string(&id),
            range.from,
            range.to,
        )
        .await?;
    Ok(Json(sessions))
}
