use crate::application::commands::command_handler::Command;

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
}

impl Command for RegisterUserCommand {}

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl Command for LoginCommand {}
