use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use momentum_domain::shared::{DomainError, UserId};
use momentum_domain::user::{User, UserRepository};

use crate::persistence::SqliteRepositoryBase;

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User::restore(
            UserId::from_string(&self.id),
            self.username,
            self.password_hash,
            self.created_at,
        )
    }
}

const SELECT_USER: &str = "SELECT id, username, password_hash, created_at FROM users";

pub struct SqliteUserRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(user.id().as_str())
                    .bind(user.username())
                    .bind(user.password_hash())
                    .bind(user.created_at()),
                "Create user",
            )
            .await
            .map_err(|e| match e {
                DomainError::Conflict(_) => {
                    DomainError::Conflict(format!("Username '{}' is taken", user.username()))
                }
                other => other,
            })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ?1", SELECT_USER);

        let row: Option<UserRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id.as_str()), "Find user by ID")
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE username = ?1", SELECT_USER);

        let row: Option<UserRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(username.trim()),
                "Find user by username",
            )
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_all_ids(&self) -> Result<Vec<UserId>, DomainError> {
        let rows: Vec<(String,)> = self
            .base
            .fetch_all(
                sqlx::query_as("SELECT id FROM users ORDER BY created_at"),
                "Find all user IDs",
            )
            .await?;

        Ok(rows.into_iter().map(|(id,)| UserId::from_string(&id)).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM users WHERE id = ?1").bind(id.as_str()),
                "Delete user",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
