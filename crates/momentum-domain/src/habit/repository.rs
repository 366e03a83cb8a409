use async_trait::async_trait;

use super::aggregate::Habit;
use crate::shared::{DomainError, HabitId, UserId};

/// Habit storage. Every lookup is scoped to the owning user, so a habit that
/// belongs to someone else reads as missing.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &HabitId,
    ) -> Result<Option<Habit>, DomainError>;

    /// Oldest first
    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError>;

    /// Insert or overwrite. Last write wins.
    async fn save(&self, habit: &Habit) -> Result<(), DomainError>;

    /// Save several habits in one transaction.
    async fn save_all(&self, habits: &[Habit]) -> Result<(), DomainError>;

    /// Start-of-day reset in a single write: clears `completed` on every
    /// habit of `user_id`, leaving streaks and histories as stored. Returns
    /// the number of habits touched.
    async fn reset_completed_for_user(&self, user_id: &UserId) -> Result<usize, DomainError>;

    /// Returns false when nothing matched.
    async fn delete(&self, user_id: &UserId, id: &HabitId) -> Result<bool, DomainError>;
}
