// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod analytics;
pub mod completion;
pub mod habit;
pub mod project;
pub mod shared;
pub mod user;

// Re-exports for convenience
pub use shared::{DomainError, HabitId, PhaseId, ProjectId, UserId};
