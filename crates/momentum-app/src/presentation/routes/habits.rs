use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Datelike;
use serde::Deserialize;

use crate::application::commands::habit_commands::*;
use crate::application::commands::CommandHandler;
use crate::application::dtos::{
    CalendarDto, HabitDto, ResetResultDto, StreakSummaryDto, TrendDto, WeeklySummaryDto,
};
use crate::presentation::auth::AuthUser;
use crate::presentation::error::ApiError;
use crate::presentation::state::SharedState;
use momentum_domain::shared::HabitId;

const DEFAULT_TREND_DAYS: u32 = 30;
const DEFAULT_SUMMARY_WEEKS: u32 = 12;

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHabitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TrendParams {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyParams {
    pub weeks: Option<u32>,
}

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/habits", get(list_habits).post(create_habit))
        .route("/habits/reset-daily", post(reset_daily))
        .route(
            "/habits/{id}",
            get(get_habit).put(update_habit).delete(delete_habit),
        )
        .route("/habits/{id}/toggle", post(toggle_habit))
        .route("/habits/{id}/streak", get(streak_summary))
        .route("/habits/{id}/calendar", get(calendar))
        .route("/habits/{id}/trend", get(trend))
        .route("/habits/{id}/weekly", get(weekly_summary))
}

/// GET /api/habits
async fn list_habits(
    State(state): State<SharedState>,
    user: AuthUser,
) -> Result<Json<Vec<HabitDto>>, ApiError> {
    Ok(Json(state.queries.habit.list(&user.user_id).await?))
}

/// POST /api/habits
async fn create_habit(
    State(state): State<SharedState>,
    user: AuthUser,
    Json(body): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitDto>), ApiError> {
    let habit = state
        .command_handlers
        .create_habit
        .handle(CreateHabitCommand {
            user_id: user.user_id,
            name: body.name,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

/// POST /api/habits/reset-daily
async fn reset_daily(
    State(state): State<SharedState>,
    user: AuthUser,
) -> Result<Json<ResetResultDto>, ApiError> {
    let result = state
        .command_handlers
        .reset_daily_habits
        .handle(ResetDailyHabitsCommand {
            user_id: user.user_id,
        })
        .await?;
    Ok(Json(result))
}

/// GET /api/habits/{id}
async fn get_habit(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<HabitDto>, ApiError> {
    let habit = state
        .queries
        .habit
        .get(&user.user_id, &HabitId::from_string(&id))
        .await?;
    Ok(Json(habit))
}

/// PUT /api/habits/{id}
async fn update_habit(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateHabitRequest>,
) -> Result<Json<HabitDto>, ApiError> {
    let habit = state
        .command_handlers
        .update_habit
        .handle(UpdateHabitCommand {
            user_id: user.user_id,
            habit_id: HabitId::from_string(&id),
            name: body.name,
            description: body.description,
        })
        .await?;
    Ok(Json(habit))
}

/// DELETE /api/habits/{id}
async fn delete_habit(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .command_handlers
        .delete_habit
        .handle(DeleteHabitCommand {
            user_id: user.user_id,
            habit_id: HabitId::from_string(&id),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/habits/{id}/toggle
async fn toggle_habit(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<HabitDto>, ApiError> {
    let habit = state
        .command_handlers
        .toggle_habit
        .handle(ToggleHabitCommand {
            user_id: user.user_id,
            habit_id: HabitId::from_string(&id),
        })
        .await?;
    Ok(Json(habit))
}

/// GET /api/habits/{id}/streak
async fn streak_summary(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<StreakSummaryDto>, ApiError> {
    let summary = state
        .queries
        .habit
        .streak_summary(&user.user_id, &HabitId::from_string(&id))
        .await?;
    Ok(Json(summary))
}

/// GET /api/habits/{id}/calendar?year&month
///
/// Defaults to the current month.
async fn calendar(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<CalendarDto>, ApiError> {
    let today = state.runtime.clock.today().naive();
    let calendar = state
        .queries
        .habit
        .calendar(
            &user.user_id,
            &HabitId::from_string(&id),
            params.year.unwrap_or(today.year()),
            params.month.unwrap_or(today.month()),
        )
        .await?;
    Ok(Json(calendar))
}

/// GET /api/habits/{id}/trend?days
async fn trend(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(params): Query<TrendParams>,
) -> Result<Json<TrendDto>, ApiError> {
    let trend = state
        .queries
        .habit
        .trend(
            &user.user_id,
            &HabitId::from_string(&id),
            params.days.unwrap_or(DEFAULT_TREND_DAYS),
        )
        .await?;
    Ok(Json(trend))
}

/// GET /api/habits/{id}/weekly?weeks
async fn weekly_summary(
    State(state): State<SharedState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(params): Query<WeeklyParams>,
) -> Result<Json<WeeklySummaryDto>, ApiError> {
    let summary = state
        .queries
        .habit
        .weekly_summary(
            &user.user_id,
            &HabitId::from_string(&id),
            params.weeks.unwrap_or(DEFAULT_SUMMARY_WEEKS),
        )
        .await?;
    Ok(Json(summary))
}
