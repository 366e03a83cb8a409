use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::presentation::auth::AuthUser;
use crate::presentation::state::SharedState;
use momentum_infrastructure::logging::{log_from_client, ClientLog};

pub fn public_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

pub fn protected_router() -> Router<SharedState> {
    Router::new().route("/logs", post(ingest_client_log))
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/version
async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /api/logs
async fn ingest_client_log(user: AuthUser, Json(log): Json<ClientLog>) -> StatusCode {
    log_from_client(&log, user.user_id.as_str());
    StatusCode::NO_CONTENT
}
