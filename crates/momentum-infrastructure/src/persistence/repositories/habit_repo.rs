use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqliteConnection, SqlitePool};
use std::sync::Arc;
use std::time::Instant;

use momentum_domain::completion::{CompletionLog, TrackableEntity, TrackingState};
use momentum_domain::habit::{Habit, HabitRepository};
use momentum_domain::shared::{DomainError, HabitId, UserId};

use crate::persistence::{RepositoryErrorMapper, SqliteRepositoryBase};

#[derive(FromRow)]
struct HabitRow {
    id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    completed: bool,
    streak: i64,
    completion_history: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HabitRow {
    fn into_habit(self) -> Habit {
        let history = CompletionLog::from_json_lenient(self.completion_history.as_deref());

        Habit::restore(
            HabitId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.name,
            self.description,
            TrackingState::restore(
                self.completed,
                u32::try_from(self.streak).unwrap_or(0),
                history,
            ),
            self.created_at,
            self.updated_at,
        )
    }
}

const SELECT_HABIT: &str = r#"
    SELECT id, user_id, name, description, completed, streak, completion_history,
           created_at, updated_at
    FROM habits
"#;

const UPSERT_HABIT: &str = r#"
    INSERT INTO habits (
        id, user_id, name, description, completed, streak, completion_history,
        created_at, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        description = excluded.description,
        completed = excluded.completed,
        streak = excluded.streak,
        completion_history = excluded.completion_history,
        updated_at = excluded.updated_at
    WHERE habits.user_id = excluded.user_id
"#;

fn upsert_query(habit: &Habit, history: String) -> sqlx::query::Query<'_, Sqlite, SqliteArguments<'_>> {
    let tracking = habit.tracking();
    sqlx::query(UPSERT_HABIT)
        .bind(habit.id().as_str())
        .bind(habit.user_id().as_str())
        .bind(habit.name())
        .bind(habit.description())
        .bind(tracking.completed)
        .bind(tracking.streak as i64)
        .bind(history)
        .bind(habit.created_at())
        .bind(habit.updated_at())
}

async fn write_habit(conn: &mut SqliteConnection, habit: &Habit) -> Result<(), DomainError> {
    let history = habit.tracking().completion_history.to_json()?;
    let result = upsert_query(habit, history)
        .execute(conn)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Save habit"))?;
    ensure_written(habit, result.rows_affected())
}

/// Zero rows means the id exists under another user.
fn ensure_written(habit: &Habit, rows_affected: u64) -> Result<(), DomainError> {
    if rows_affected == 0 {
        return Err(DomainError::HabitNotFound(habit.id().to_string()));
    }
    Ok(())
}

pub struct SqliteHabitRepository {
    base: SqliteRepositoryBase,
}

impl SqliteHabitRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl HabitRepository for SqliteHabitRepository {
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &HabitId,
    ) -> Result<Option<Habit>, DomainError> {
        let query = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_HABIT);

        let row: Option<HabitRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(id.as_str())
                    .bind(user_id.as_str()),
                "Find habit by ID",
            )
            .await?;

        Ok(row.map(HabitRow::into_habit))
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError> {
        let query = format!("{} WHERE user_id = ?1 ORDER BY created_at, id", SELECT_HABIT);

        let rows: Vec<HabitRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query).bind(user_id.as_str()),
                "Find habits for user",
            )
            .await?;

        Ok(rows.into_iter().map(HabitRow::into_habit).collect())
    }

    async fn save(&self, habit: &Habit) -> Result<(), DomainError> {
        let history = habit.tracking().completion_history.to_json()?;
        let result = self
            .base
            .execute(upsert_query(habit, history), "Save habit")
            .await?;
        ensure_written(habit, result.rows_affected())
    }

    async fn save_all(&self, habits: &[Habit]) -> Result<(), DomainError> {
        if habits.is_empty() {
            return Ok(());
        }

        let started = Instant::now();
        let mut tx = self.base.begin().await?;
        for habit in habits {
            write_habit(&mut tx, habit).await?;
        }
        self.base.commit(tx, "Save habits").await?;

        log::info!(
            "[db] Saved {} habits in {}ms",
            habits.len(),
            started.elapsed().as_millis()
        );
        Ok(())
    }

    async fn reset_completed_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("UPDATE habits SET completed = 0 WHERE user_id = ?1")
                    .bind(user_id.as_str()),
                "Reset habits",
            )
            .await?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete(&self, user_id: &UserId, id: &HabitId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM habits WHERE id = ?1 AND user_id = ?2")
                    .bind(id.as_str())
                    .bind(user_id.as_str()),
                "Delete habit",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
