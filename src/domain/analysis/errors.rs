//! Analysis store error types.

use thiserror::Error;

use crate::ports::ObjectStorageError;

/// Errors surfaced by the analysis data store.
///
/// Nothing here is recovered locally; every variant propagates to the
/// invocation boundary unchanged.
#[derive(Debug, Error)]
pub enum AnalysisStoreError {
    /// Fetching an object failed, including a missing key.
    #[error("Failed to read {key}: {source}")]
    StorageRead {
        key: &'static str,
        #[source]
        source: ObjectStorageError,
    },

    /// Writing an object failed. Earlier writes of the same update are kept.
    #[error("Failed to write {key}: {source}")]
    StorageWrite {
        key: &'static str,
        #[source]
        source: ObjectStorageError,
    },

    /// A stored document is not valid JSON for its shape.
    #[error("Malformed payload in {key}: {source}")]
    MalformedPayload {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize analysis data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisStoreError {
    pub fn read(key: &'static str, source: ObjectStorageError) -> Self {
        Self::StorageRead { key, source }
    }

    pub fn write(key: &'static str, source: ObjectStorageError) -> Self {
        Self::StorageWrite { key, source }
    }

    pub fn malformed(key: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedPayload { key, source }
    }

    /// True when the failure was a read of a key that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StorageRead {
                source: ObjectStorageError::NotFound { .. },
                ..
            }
        )
    }

    /// The object key involved, when the error is tied to one.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::StorageRead { key, .. }
            | Self::StorageWrite { key, .. }
            | Self::MalformedPayload { key, .. } => Some(key),
            Self::Serialization(_) => None,
        }
    }
}
