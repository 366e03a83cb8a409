#![allow(dead_code)]

use momentum_domain::user::{User, UserRepository};
use momentum_infrastructure::persistence::repositories::SqliteUserRepository;
use momentum_infrastructure::persistence::Database;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Fresh migrated in-memory database.
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    Arc::new(db.pool().clone())
}

pub async fn create_user(pool: &Arc<SqlitePool>, username: &str) -> User {
    let user = User::new(username, "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string())
        .expect("valid user");
    SqliteUserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("create user");
    user
}

pub fn day(s: &str) -> momentum_domain::completion::CompletionDate {
    s.parse().expect("valid date")
}
