use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::auth_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::{AuthResponseDto, UserDto};
use crate::application::utils::ResultExt;
use momentum_domain::shared::DomainError;
use momentum_domain::user::{User, UserRepository};
use momentum_infrastructure::security::{hash_password, verify_password, JwtService};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Argon2 is deliberately slow, keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.to_infra_err()?
}

pub struct RegisterUserCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl RegisterUserCommandHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { user_repo, jwt }
    }
}

#[async_trait]
impl CommandHandler<RegisterUserCommand> for RegisterUserCommandHandler {
    type Result = AuthResponseDto;

    async fn handle(&self, cmd: RegisterUserCommand) -> Result<Self::Result, DomainError> {
        info!("Handling RegisterUserCommand for username: {}", cmd.username);

        let username = User::validate_username(&cmd.username)?;
        User::validate_password(&cmd.password)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Username '{}' is taken",
                username
            )));
        }

        let password = cmd.password;
        let password_hash = run_blocking(move || hash_password(&password)).await?;
        let user = User::new(&username, password_hash)?;

        // The unique index still guards against a concurrent registration
        self.user_repo.create(&user).await?;

        let issued = self.jwt.issue(user.id(), user.username())?;
        info!("User registered: {} ({})", user.username(), user.id());

        Ok(AuthResponseDto {
            user: UserDto::from(&user),
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}

pub struct LoginCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl LoginCommandHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { user_repo, jwt }
    }
}

#[async_trait]
impl CommandHandler<LoginCommand> for LoginCommandHandler {
    type Result = AuthResponseDto;

    async fn handle(&self, cmd: LoginCommand) -> Result<Self::Result, DomainError> {
        info!("Handling LoginCommand for username: {}", cmd.username);

        let user = match self.user_repo.find_by_username(cmd.username.trim()).await? {
            Some(user) => user,
            None => {
                warn!("Login rejected: unknown username {}", cmd.username);
                return Err(DomainError::InvalidCredentials(
                    INVALID_CREDENTIALS.to_string(),
                ));
            }
        };

        let password = cmd.password;
        let hash = user.password_hash().to_string();
        let matches = run_blocking(move || verify_password(&password, &hash)).await?;
        if !matches {
            warn!("Login rejected: wrong password for {}", user.username());
            return Err(DomainError::InvalidCredentials(
                INVALID_CREDENTIALS.to_string(),
            ));
        }

        let issued = self.jwt.issue(user.id(), user.username())?;
        info!("User logged in: {}", user.username());

        Ok(AuthResponseDto {
            user: UserDto::from(&user),
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}
