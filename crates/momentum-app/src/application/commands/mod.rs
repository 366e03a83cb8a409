pub mod auth_commands;
pub mod command_handler;
pub mod habit_commands;
pub mod handlers;
pub mod project_commands;

pub use command_handler::{Command, CommandHandler};
