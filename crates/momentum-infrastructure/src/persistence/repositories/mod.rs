mod habit_repo;
mod project_repo;
mod user_repo;

pub use habit_repo::SqliteHabitRepository;
pub use project_repo::SqliteProjectRepository;
pub use user_repo::SqliteUserRepository;
