use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::keys;
use super::middleware::{logging_middleware, security_headers_middleware};
use super::state::AppState;

/// Create the portal router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/me/permissions", get(keys::permissions))
        .route("/request-key", post(keys::request_key))
        .route("/api-keys", get(keys::list_api_keys))
        .route("/api-keys/{id}", delete(keys::revoke_api_key))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
}
