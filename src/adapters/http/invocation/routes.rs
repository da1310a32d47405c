//! HTTP routes for the invocation endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, invoke, InvocationHandlers};

/// Creates the invocation router.
pub fn invocation_routes(handlers: InvocationHandlers) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .route("/health", get(health))
        .with_state(handlers)
}
