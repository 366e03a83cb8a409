mod dashboard_queries;
mod habit_queries;
mod project_queries;

pub use dashboard_queries::DashboardQueries;
pub use habit_queries::HabitQueries;
pub use project_queries::ProjectQueries;
