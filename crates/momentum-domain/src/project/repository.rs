use async_trait::async_trait;

use super::aggregate::Project;
use crate::shared::{DomainError, ProjectId, UserId};

/// Project storage, phases included. Lookups are scoped to the owner.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, DomainError>;

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError>;

    /// Insert or overwrite the project and replace its phases.
    async fn save(&self, project: &Project) -> Result<(), DomainError>;

    async fn save_all(&self, projects: &[Project]) -> Result<(), DomainError>;

    /// Clears the goal's `completed` flag on every project of `user_id` in a
    /// single write. Returns the number of projects touched.
    async fn reset_completed_for_user(&self, user_id: &UserId) -> Result<usize, DomainError>;

    async fn delete(&self, user_id: &UserId, id: &ProjectId) -> Result<bool, DomainError>;
}
