use async_trait::async_trait;

use super::aggregate::User;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Every user id, for jobs that sweep all accounts.
    async fn find_all_ids(&self) -> Result<Vec<UserId>, DomainError>;

    /// Removes the user and, through cascading deletes, everything they own.
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;
}
