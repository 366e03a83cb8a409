mod analytics_dto;
mod auth_dto;
mod dashboard_dto;
mod habit_dto;
mod project_dto;

pub use analytics_dto::*;
pub use auth_dto::*;
pub use dashboard_dto::*;
pub use habit_dto::*;
pub use project_dto::*;
