//! HTTP handlers for the invocation endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::analysis::{InvocationError, InvocationEvent, InvocationHandler};
use crate::domain::analysis::AnalysisStoreError;

use super::dto::{ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InvocationHandlers {
    dispatcher: Arc<dyn InvocationHandler>,
}

impl InvocationHandlers {
    pub fn new(dispatcher: Arc<dyn InvocationHandler>) -> Self {
        Self { dispatcher }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /invoke - Run one managed-API invocation
pub async fn invoke(State(handlers): State<InvocationHandlers>, body: Bytes) -> Response {
    let event: InvocationEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "Invalid invocation event: {}",
                    e
                ))),
            )
                .into_response()
        }
    };

    match handlers.dispatcher.invoke(event).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_invocation_error(e),
    }
}

/// GET /health - Liveness and active layout
pub async fn health(State(handlers): State<InvocationHandlers>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        layout: handlers.dispatcher.layout(),
        bucket: handlers.dispatcher.bucket().to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_invocation_error(error: InvocationError) -> Response {
    let message = error.to_string();
    match error {
        InvocationError::InvalidArguments { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::invalid_arguments(message)),
        )
            .into_response(),
        InvocationError::Store(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(message)),
        )
            .into_response(),
        InvocationError::Store(AnalysisStoreError::StorageRead { .. })
        | InvocationError::Store(AnalysisStoreError::StorageWrite { .. }) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::storage(message)),
        )
            .into_response(),
        InvocationError::Store(AnalysisStoreError::MalformedPayload { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::malformed_payload(message)),
        )
            .into_response(),
        InvocationError::Store(AnalysisStoreError::Serialization(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ObjectStorageError;

    #[test]
    fn invalid_arguments_map_to_bad_request() {
        let response = handle_invocation_error(InvocationError::InvalidArguments {
            operation: "updateAnalysisData",
            message: "analysisData is required".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_key_maps_to_not_found() {
        let response = handle_invocation_error(InvocationError::Store(AnalysisStoreError::read(
            "analysisData.json",
            ObjectStorageError::not_found("analysisData.json"),
        )));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failures_map_to_bad_gateway() {
        let read = handle_invocation_error(InvocationError::Store(AnalysisStoreError::read(
            "analysisData.json",
            ObjectStorageError::permission_denied("analysisData.json"),
        )));
        let write = handle_invocation_error(InvocationError::Store(AnalysisStoreError::write(
            "tickerAnalysis.json",
            ObjectStorageError::backend("SlowDown"),
        )));
        assert_eq!(read.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(write.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn malformed_payload_maps_to_internal_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let response = handle_invocation_error(InvocationError::Store(
            AnalysisStoreError::malformed("analysisData.json", parse_err),
        ));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
