use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{DashboardQueries, HabitQueries, ProjectQueries};
use crate::application::services::DailyResetService;
use momentum_domain::habit::HabitRepository;
use momentum_domain::project::ProjectRepository;
use momentum_domain::shared::Clock;
use momentum_domain::user::UserRepository;
use momentum_infrastructure::persistence::Database;
use momentum_infrastructure::security::JwtService;

/// Command handlers container
pub struct CommandHandlers {
    pub register_user: Arc<RegisterUserCommandHandler>,
    pub login: Arc<LoginCommandHandler>,
    pub create_habit: Arc<CreateHabitCommandHandler>,
    pub update_habit: Arc<UpdateHabitCommandHandler>,
    pub delete_habit: Arc<DeleteHabitCommandHandler>,
    pub toggle_habit: Arc<ToggleHabitCommandHandler>,
    pub reset_daily_habits: Arc<ResetDailyHabitsCommandHandler>,
    pub create_project: Arc<CreateProjectCommandHandler>,
    pub update_project: Arc<UpdateProjectCommandHandler>,
    pub delete_project: Arc<DeleteProjectCommandHandler>,
    pub toggle_project_mvg: Arc<ToggleProjectMvgCommandHandler>,
    pub reset_daily_mvgs: Arc<ResetDailyMvgsCommandHandler>,
    pub add_phase: Arc<AddPhaseCommandHandler>,
    pub update_phase: Arc<UpdatePhaseCommandHandler>,
    pub remove_phase: Arc<RemovePhaseCommandHandler>,
    pub record_work_session: Arc<RecordWorkSessionCommandHandler>,
    pub set_work_schedule: Arc<SetWorkScheduleCommandHandler>,
}

/// Auth cookie settings taken from configuration.
#[derive(Debug, Clone)]
pub struct AuthCookie {
    pub name: String,
    pub secure: bool,
}

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub clock: Arc<dyn Clock>,
    pub jwt: Arc<JwtService>,
    pub auth_cookie: AuthCookie,
}

pub struct Repositories {
    pub user: Arc<dyn UserRepository>,
    pub habit: Arc<dyn HabitRepository>,
    pub project: Arc<dyn ProjectRepository>,
}

pub struct Services {
    pub daily_reset: Arc<DailyResetService>,
}

pub struct Queries {
    pub habit: Arc<HabitQueries>,
    pub project: Arc<ProjectQueries>,
    pub dashboard: Arc<DashboardQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

/// State handed to every axum handler.
pub type SharedState = Arc<AppState>;
