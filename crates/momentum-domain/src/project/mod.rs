mod aggregate;
mod phase;
mod repository;
mod schedule;


pub use aggregate::{MinimumViableGoal, Project, ProjectStatus};
pub use phase::{Phase, PhaseChanges, PhaseStatus};
pub use repository::ProjectRepository;
pub use schedule::WorkSchedule;
