use axum::middleware;
use axum::Router;
use serde::{Deserialize, Deserializer};
use tower_http::trace::TraceLayer;

use crate::presentation::auth::require_auth;
use crate::presentation::state::SharedState;

mod auth;
mod dashboard;
mod habits;
mod projects;
mod system;

/// Every `/api` route. Everything except health, version and the login flow
/// sits behind [`require_auth`].
pub fn build_router(state: SharedState) -> Router {
    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(system::protected_router())
        .merge(habits::router())
        .merge(projects::router())
        .merge(dashboard::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .merge(system::public_router())
        .merge(auth::public_router());

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Tells a missing field (`None`) apart from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
