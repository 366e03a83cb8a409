use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::application::commands::auth_commands::{LoginCommand, RegisterUserCommand};
use crate::application::commands::CommandHandler;
use crate::application::dtos::{AuthResponseDto, UserDto};
use crate::presentation::auth::{removal_cookie, session_cookie, AuthUser};
use crate::presentation::error::ApiError;
use crate::presentation::state::SharedState;
use momentum_domain::shared::DomainError;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

pub fn public_router() -> Router<SharedState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn protected_router() -> Router<SharedState> {
    Router::new().route("/auth/me", get(me))
}

/// POST /api/auth/register
async fn register(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponseDto>), ApiError> {
    let response = state
        .command_handlers
        .register_user
        .handle(RegisterUserCommand {
            username: body.username,
            password: body.password,
        })
        .await?;

    let jar = jar.add(session_cookie(
        &state.runtime.auth_cookie,
        response.token.clone(),
    ));
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// POST /api/auth/login
async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(body): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<AuthResponseDto>), ApiError> {
    let response = state
        .command_handlers
        .login
        .handle(LoginCommand {
            username: body.username,
            password: body.password,
        })
        .await?;

    let jar = jar.add(session_cookie(
        &state.runtime.auth_cookie,
        response.token.clone(),
    ));
    Ok((jar, Json(response)))
}

/// POST /api/auth/logout
async fn logout(State(state): State<SharedState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(removal_cookie(&state.runtime.auth_cookie)),
        StatusCode::NO_CONTENT,
    )
}

/// GET /api/auth/me
async fn me(State(state): State<SharedState>, user: AuthUser) -> Result<Json<UserDto>, ApiError> {
    let found = state
        .repositories
        .user
        .find_by_id(&user.user_id)
        .await?
        .ok_or_else(|| DomainError::UserNotFound(user.user_id.to_string()))?;
    Ok(Json(UserDto::from(&found)))
}
