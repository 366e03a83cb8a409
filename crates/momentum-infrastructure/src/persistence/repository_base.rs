use momentum_domain::shared::DomainError;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;
use std::time::Instant;

use super::error_mapper::RepositoryErrorMapper;

type Args<'q> = <Sqlite as sqlx::Database>::Arguments<'q>;

/// Shared pool access for the SQLite repositories: runs a query, logs how
/// long it took and maps failures to [`DomainError`].
#[derive(Clone)]
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, Args<'q>>,
        operation: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        let started = Instant::now();
        let result = query
            .execute(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, operation))?;

        log::debug!(
            "[db] {} rows_affected={} elapsed={}ms",
            operation,
            result.rows_affected(),
            started.elapsed().as_millis()
        );
        Ok(result)
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, Args<'q>>,
        operation: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        let started = Instant::now();
        let row = query
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, operation))?;

        log::debug!(
            "[db] {} found={} elapsed={}ms",
            operation,
            row.is_some(),
            started.elapsed().as_millis()
        );
        Ok(row)
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, Args<'q>>,
        operation: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        let started = Instant::now();
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, operation))?;

        log::debug!(
            "[db] {} rows={} elapsed={}ms",
            operation,
            rows.len(),
            started.elapsed().as_millis()
        );
        Ok(rows)
    }

    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, Sqlite>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Begin transaction"))
    }

    pub async fn commit(
        &self,
        tx: sqlx::Transaction<'static, Sqlite>,
        operation: &str,
    ) -> Result<(), DomainError> {
        tx.commit()
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, operation))
    }
}
