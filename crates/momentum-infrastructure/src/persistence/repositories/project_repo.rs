use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use momentum_domain::completion::{CompletionDate, CompletionLog, TrackingState};
use momentum_domain::project::{
    MinimumViableGoal, Phase, PhaseStatus, Project, ProjectRepository, ProjectStatus,
    WorkSchedule,
};
use momentum_domain::shared::{DomainError, PhaseId, ProjectId, UserId};

use crate::persistence::{RepositoryErrorMapper, SqliteRepositoryBase};

#[derive(FromRow)]
struct ProjectRow {
    id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    status: String,
    mvg_description: Option<String>,
    mvg_completed: bool,
    mvg_streak: i64,
    mvg_completion_history: Option<String>,
    session_log: Option<String>,
    work_schedule: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PhaseRow {
    id: String,
    project_id: String,
    name: String,
    status: String,
    position: i64,
    due_date: Option<String>,
}

impl PhaseRow {
    fn into_phase(self) -> Result<Phase, DomainError> {
        let status: PhaseStatus = self.status.parse().map_err(|_| {
            DomainError::DataIntegrity(format!(
                "Phase {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        let due_date = self.due_date.as_deref().and_then(|raw| {
            CompletionDate::parse(raw)
                .map_err(|e| log::warn!("[projects] phase {} due date dropped: {}", self.id, e))
                .ok()
        });

        Ok(Phase::restore(
            PhaseId::from_string(&self.id),
            self.name,
            status,
            u32::try_from(self.position).unwrap_or(0),
            due_date,
        ))
    }
}

impl ProjectRow {
    fn into_project(self, phases: Vec<Phase>) -> Result<Project, DomainError> {
        let status: ProjectStatus = self.status.parse().map_err(|_| {
            DomainError::DataIntegrity(format!(
                "Project {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        let schedule = self.work_schedule.as_deref().and_then(|raw| {
            serde_json::from_str::<WorkSchedule>(raw)
                .map_err(|e| log::warn!("[projects] project {} schedule dropped: {}", self.id, e))
                .ok()
        });

        let mvg = MinimumViableGoal {
            description: self.mvg_description,
            tracking: TrackingState::restore(
                self.mvg_completed,
                u32::try_from(self.mvg_streak).unwrap_or(0),
                CompletionLog::from_json_lenient(self.mvg_completion_history.as_deref()),
            ),
        };

        Ok(Project::restore(
            ProjectId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.name,
            self.description,
            status,
            phases,
            mvg,
            CompletionLog::from_json_lenient(self.session_log.as_deref()),
            schedule,
            self.created_at,
            self.updated_at,
        ))
    }
}

const SELECT_PROJECT: &str = r#"
    SELECT id, user_id, name, description, status, mvg_description, mvg_completed,
           mvg_streak, mvg_completion_history, session_log, work_schedule,
           created_at, updated_at
    FROM projects
"#;

const UPSERT_PROJECT: &str = r#"
    INSERT INTO projects (
        id, user_id, name, description, status, mvg_description, mvg_completed,
        mvg_streak, mvg_completion_history, session_log, work_schedule,
        created_at, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        description = excluded.description,
        status = excluded.status,
        mvg_description = excluded.mvg_description,
        mvg_completed = excluded.mvg_completed,
        mvg_streak = excluded.mvg_streak,
        mvg_completion_history = excluded.mvg_completion_history,
        session_log = excluded.session_log,
        work_schedule = excluded.work_schedule,
        updated_at = excluded.updated_at
    WHERE projects.user_id = excluded.user_id
"#;

/// Upsert the project row and replace its phases. Runs on the caller's
/// transaction.
async fn write_project(conn: &mut SqliteConnection, project: &Project) -> Result<(), DomainError> {
    let tracking = &project.mvg().tracking;
    let mvg_history = tracking.completion_history.to_json()?;
    let session_log = project.session_log().to_json()?;
    let schedule = project
        .schedule()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Encode work schedule"))?;

    let result = sqlx::query(UPSERT_PROJECT)
        .bind(project.id().as_str())
        .bind(project.user_id().as_str())
        .bind(project.name())
        .bind(project.description())
        .bind(project.status().as_str())
        .bind(project.mvg().description.as_deref())
        .bind(tracking.completed)
        .bind(tracking.streak as i64)
        .bind(mvg_history)
        .bind(session_log)
        .bind(schedule)
        .bind(project.created_at())
        .bind(project.updated_at())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Save project"))?;

    // Row belongs to another user; leave its phases alone.
    if result.rows_affected() == 0 {
        return Err(DomainError::ProjectNotFound(project.id().to_string()));
    }

    sqlx::query("DELETE FROM project_phases WHERE project_id = ?1")
        .bind(project.id().as_str())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Clear project phases"))?;

    for phase in project.phases() {
        sqlx::query(
            r#"
            INSERT INTO project_phases (id, project_id, name, status, position, due_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(phase.id().as_str())
        .bind(project.id().as_str())
        .bind(phase.name())
        .bind(phase.status().as_str())
        .bind(phase.position() as i64)
        .bind(phase.due_date().map(|d| d.to_string()))
        .execute(&mut *conn)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Save project phase"))?;
    }

    Ok(())
}

pub struct SqliteProjectRepository {
    base: SqliteRepositoryBase,
}

impl SqliteProjectRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    async fn phases_by_project(
        &self,
        user_id: &UserId,
        project_id: Option<&ProjectId>,
    ) -> Result<HashMap<String, Vec<Phase>>, DomainError> {
        let mut query = String::from(
            r#"
            SELECT ph.id, ph.project_id, ph.name, ph.status, ph.position, ph.due_date
            FROM project_phases ph
            JOIN projects p ON p.id = ph.project_id
            WHERE p.user_id = ?1
            "#,
        );
        if project_id.is_some() {
            query.push_str(" AND p.id = ?2");
        }
        query.push_str(" ORDER BY ph.project_id, ph.position");

        let mut q = sqlx::query_as::<_, PhaseRow>(&query).bind(user_id.as_str());
        if let Some(project_id) = project_id {
            q = q.bind(project_id.as_str());
        }

        let rows = self.base.fetch_all(q, "Find project phases").await?;

        let mut grouped: HashMap<String, Vec<Phase>> = HashMap::new();
        for row in rows {
            let project_id = row.project_id.clone();
            grouped.entry(project_id).or_default().push(row.into_phase()?);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, DomainError> {
        let query = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_PROJECT);

        let row: Option<ProjectRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(id.as_str())
                    .bind(user_id.as_str()),
                "Find project by ID",
            )
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut phases = self.phases_by_project(user_id, Some(id)).await?;
        let phases = phases.remove(id.as_str()).unwrap_or_default();
        row.into_project(phases).map(Some)
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let query = format!("{} WHERE user_id = ?1 ORDER BY created_at, id", SELECT_PROJECT);

        let rows: Vec<ProjectRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query).bind(user_id.as_str()),
                "Find projects for user",
            )
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut phases = self.phases_by_project(user_id, None).await?;
        rows.into_iter()
            .map(|row| {
                let project_phases = phases.remove(&row.id).unwrap_or_default();
                row.into_project(project_phases)
            })
            .collect()
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        let started = Instant::now();
        let mut tx = self.base.begin().await?;
        write_project(&mut tx, project).await?;
        self.base.commit(tx, "Save project").await?;

        log::debug!(
            "[db] Saved project {} with {} phases in {}ms",
            project.id(),
            project.phases().len(),
            started.elapsed().as_millis()
        );
        Ok(())
    }

    async fn save_all(&self, projects: &[Project]) -> Result<(), DomainError> {
        if projects.is_empty() {
            return Ok(());
        }

        let started = Instant::now();
        let mut tx = self.base.begin().await?;
        for project in projects {
            write_project(&mut tx, project).await?;
        }
        self.base.commit(tx, "Save projects").await?;

        log::info!(
            "[db] Saved {} projects in {}ms",
            projects.len(),
            started.elapsed().as_millis()
        );
        Ok(())
    }

    async fn reset_completed_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("UPDATE projects SET mvg_completed = 0 WHERE user_id = ?1")
                    .bind(user_id.as_str()),
                "Reset project goals",
            )
            .await?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete(&self, user_id: &UserId, id: &ProjectId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM projects WHERE id = ?1 AND user_id = ?2")
                    .bind(id.as_str())
                    .bind(user_id.as_str()),
                "Delete project",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
