//! InvocationDispatcher - routes managed-API events to the analysis store.
//!
//! | fieldName            | action                     |
//! |----------------------|----------------------------|
//! | `getAnalysisData`    | `AnalysisDataStore::get`   |
//! | `updateAnalysisData` | `AnalysisDataStore::update`|
//! | anything else        | `NoSuchOperation` (`null`) |
//!
//! Unknown operations are a documented no-op, not an error, and touch no
//! storage.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::invocation::{InvocationEvent, InvocationOutcome, Operation, UPDATE_ANALYSIS_DATA};
use super::store::AnalysisDataStore;
use crate::domain::analysis::{
    AnalysisStoreError, LayoutKind, PerFieldDocuments, SingleDocument, StorageLayout,
};
use crate::ports::ObjectStorage;

/// Errors returned to the managed API layer as resolver errors.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The event's arguments do not fit the operation.
    #[error("Invalid arguments for {operation}: {message}")]
    InvalidArguments {
        operation: &'static str,
        message: String,
    },

    #[error(transparent)]
    Store(#[from] AnalysisStoreError),
}

impl InvocationError {
    fn invalid_update(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            operation: UPDATE_ANALYSIS_DATA,
            message: message.into(),
        }
    }
}

/// Layout-erased entry point used by transports.
#[async_trait]
pub trait InvocationHandler: Send + Sync {
    fn layout(&self) -> LayoutKind;

    fn bucket(&self) -> &str;

    /// Handle one event, returning the result as JSON (`null` for unknown
    /// operations).
    async fn invoke(&self, event: InvocationEvent) -> Result<Value, InvocationError>;
}

/// Typed dispatcher for one storage layout.
pub struct InvocationDispatcher<L: StorageLayout> {
    store: AnalysisDataStore<L>,
}

impl<L: StorageLayout> InvocationDispatcher<L> {
    pub fn new(store: AnalysisDataStore<L>) -> Self {
        Self { store }
    }

    pub fn from_storage(storage: Arc<dyn ObjectStorage>) -> Self {
        Self::new(AnalysisDataStore::new(storage))
    }

    pub fn store(&self) -> &AnalysisDataStore<L> {
        &self.store
    }

    /// Dispatch one event.
    pub async fn dispatch(
        &self,
        event: InvocationEvent,
    ) -> Result<InvocationOutcome<L::Data>, InvocationError> {
        let span = info_span!(
            "invocation",
            invocation_id = %Uuid::new_v4(),
            field_name = %event.info.field_name,
            layout = %L::KIND,
        );

        async move {
            let result = self.route(event).await;
            if let Err(e) = &result {
                warn!(error = %e, "Invocation failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn route(
        &self,
        event: InvocationEvent,
    ) -> Result<InvocationOutcome<L::Data>, InvocationError> {
        match event.operation() {
            Operation::GetAnalysisData => {
                info!("Reading analysis data");
                let data = self.store.get().await?;
                Ok(InvocationOutcome::Data(data))
            }
            Operation::UpdateAnalysisData => {
                let payload = event
                    .arguments
                    .analysis_data
                    .ok_or_else(|| InvocationError::invalid_update("analysisData is required"))?;
                let data: L::Data = serde_json::from_value(payload)
                    .map_err(|e| InvocationError::invalid_update(e.to_string()))?;

                info!("Updating analysis data");
                let data = self.store.update(data).await?;
                Ok(InvocationOutcome::Data(data))
            }
            Operation::Unknown(field_name) => {
                debug!(%field_name, "No such operation");
                Ok(InvocationOutcome::NoSuchOperation)
            }
        }
    }
}

#[async_trait]
impl<L: StorageLayout> InvocationHandler for InvocationDispatcher<L> {
    fn layout(&self) -> LayoutKind {
        L::KIND
    }

    fn bucket(&self) -> &str {
        self.store.bucket()
    }

    async fn invoke(&self, event: InvocationEvent) -> Result<Value, InvocationError> {
        let outcome = self.dispatch(event).await?;
        let value = serde_json::to_value(&outcome).map_err(AnalysisStoreError::from)?;
        Ok(value)
    }
}

/// Build the dispatcher for the configured layout.
///
/// This is the only place the layout is chosen; everything behind it is
/// statically typed.
pub fn dispatcher_for(
    layout: LayoutKind,
    storage: Arc<dyn ObjectStorage>,
) -> Arc<dyn InvocationHandler> {
    match layout {
        LayoutKind::SingleDocument => {
            Arc::new(InvocationDispatcher::<SingleDocument>::from_storage(storage))
        }
        LayoutKind::PerField => {
            Arc::new(InvocationDispatcher::<PerFieldDocuments>::from_storage(storage))
        }
    }
}
