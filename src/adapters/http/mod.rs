//! HTTP adapters - the transport the managed API layer invokes.
//!
//! `POST /invoke` accepts an invocation event and answers with the
//! invocation result; `GET /health` reports liveness and the active layout.

pub mod invocation;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::application::handlers::analysis::InvocationHandler;

pub use invocation::{invocation_routes, ErrorResponse, HealthResponse, InvocationHandlers};

/// Builds the full application router.
///
/// Requests exceeding `request_timeout` are answered with 408; any writes
/// already issued by the interrupted invocation are not undone.
pub fn app_router(dispatcher: Arc<dyn InvocationHandler>, request_timeout: Duration) -> Router {
    invocation_routes(InvocationHandlers::new(dispatcher))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
