use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::queries::{DashboardQueries, HabitQueries, ProjectQueries};
use crate::application::services::DailyResetService;
use crate::presentation::state::{
    AppState, AuthCookie, CommandHandlers, Queries, Repositories, Runtime, Services,
};
use momentum_domain::habit::HabitRepository;
use momentum_domain::project::ProjectRepository;
use momentum_domain::shared::{Clock, DomainError};
use momentum_domain::user::UserRepository;
use momentum_infrastructure::persistence::repositories::{
    SqliteHabitRepository, SqliteProjectRepository, SqliteUserRepository,
};
use momentum_infrastructure::persistence::Database;
use momentum_infrastructure::security::JwtService;
use momentum_infrastructure::{AppConfig, SystemClock};

/// Open the configured database, migrate it and wire every component.
pub async fn build_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let startup_started_at = Instant::now();

    info!("Database path: {}", config.database_path.display());

    info!("🔌 Connecting to database...");
    let started_at = Instant::now();
    let database = Database::new(&config.database_path, config.db_max_connections).await?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    let state = build_app_state_with(database, config, Arc::new(SystemClock)).await?;

    info!(
        "✓ Application state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );
    Ok(state)
}

/// Wire the application around an already opened database and a clock.
pub async fn build_app_state_with(
    database: Database,
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, DomainError> {
    info!("🔄 Running migrations...");
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());
    let jwt = Arc::new(JwtService::new(&config.jwt_secret, config.token_ttl_hours)?);

    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone())) as Arc<dyn UserRepository>;
    let habit_repo =
        Arc::new(SqliteHabitRepository::new(pool.clone())) as Arc<dyn HabitRepository>;
    let project_repo =
        Arc::new(SqliteProjectRepository::new(pool.clone())) as Arc<dyn ProjectRepository>;

    let command_handlers = CommandHandlers {
        register_user: Arc::new(RegisterUserCommandHandler::new(
            user_repo.clone(),
            jwt.clone(),
        )),
        login: Arc::new(LoginCommandHandler::new(user_repo.clone(), jwt.clone())),
        create_habit: Arc::new(CreateHabitCommandHandler::new(
            habit_repo.clone(),
            clock.clone(),
        )),
        update_habit: Arc::new(UpdateHabitCommandHandler::new(
            habit_repo.clone(),
            clock.clone(),
        )),
        delete_habit: Arc::new(DeleteHabitCommandHandler::new(habit_repo.clone())),
        toggle_habit: Arc::new(ToggleHabitCommandHandler::new(
            habit_repo.clone(),
            clock.clone(),
        )),
        reset_daily_habits: Arc::new(ResetDailyHabitsCommandHandler::new(habit_repo.clone())),
        create_project: Arc::new(CreateProjectCommandHandler::new(project_repo.clone())),
        update_project: Arc::new(UpdateProjectCommandHandler::new(project_repo.clone())),
        delete_project: Arc::new(DeleteProjectCommandHandler::new(project_repo.clone())),
        toggle_project_mvg: Arc::new(ToggleProjectMvgCommandHandler::new(
            project_repo.clone(),
            clock.clone(),
        )),
        reset_daily_mvgs: Arc::new(ResetDailyMvgsCommandHandler::new(project_repo.clone())),
        add_phase: Arc::new(AddPhaseCommandHandler::new(project_repo.clone())),
        update_phase: Arc::new(UpdatePhaseCommandHandler::new(project_repo.clone())),
        remove_phase: Arc::new(RemovePhaseCommandHandler::new(project_repo.clone())),
        record_work_session: Arc::new(RecordWorkSessionCommandHandler::new(
            project_repo.clone(),
            clock.clone(),
        )),
        set_work_schedule: Arc::new(SetWorkScheduleCommandHandler::new(project_repo.clone())),
    };

    let queries = Queries {
        habit: Arc::new(HabitQueries::new(habit_repo.clone(), clock.clone())),
        project: Arc::new(ProjectQueries::new(project_repo.clone())),
        dashboard: Arc::new(DashboardQueries::new(
            habit_repo.clone(),
            project_repo.clone(),
            clock.clone(),
        )),
    };

    let services = Services {
        daily_reset: Arc::new(DailyResetService::new(
            user_repo.clone(),
            habit_repo.clone(),
            project_repo.clone(),
        )),
    };

    Ok(AppState {
        runtime: Runtime {
            pool,
            db: Arc::new(database),
            clock,
            jwt,
            auth_cookie: AuthCookie {
                name: config.cookie_name.clone(),
                secure: config.cookie_secure,
            },
        },
        repositories: Repositories {
            user: user_repo,
            habit: habit_repo,
            project: project_repo,
        },
        services,
        queries,
        command_handlers,
    })
}
