//! HTTP adapter for managed-API invocations.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::InvocationHandlers;
pub use routes::invocation_routes;
