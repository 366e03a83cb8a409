use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::application::dtos::DashboardDto;
use crate::presentation::auth::AuthUser;
use crate::presentation::error::ApiError;
use crate::presentation::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// GET /api/dashboard
async fn dashboard(
    State(state): State<SharedState>,
    user: AuthUser,
) -> Result<Json<DashboardDto>, ApiError> {
    let summary = state.queries.dashboard.summary(&user.user_id).await?;
    Ok(Json(summary))
}
