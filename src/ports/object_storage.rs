//! Object Storage Port - Blob get/put interface.
//!
//! The analysis store persists everything through this port. An adapter is
//! bound to exactly one bucket at construction; callers only ever name keys.

use async_trait::async_trait;
use thiserror::Error;

/// Port for reading and writing whole objects in one bucket.
///
/// # Contract
///
/// Implementations must:
/// - Return `ObjectStorageError::NotFound` when the key does not exist
/// - Return the stored bytes unchanged (an empty object reads back empty)
/// - Overwrite unconditionally on put (last write wins per key)
/// - Never retry; failures go straight back to the caller
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Name of the bucket this adapter is bound to.
    fn bucket(&self) -> &str;

    /// Fetch the full body of an object.
    ///
    /// # Errors
    ///
    /// Returns `ObjectStorageError::NotFound` if the key doesn't exist.
    async fn get_object(&self, key: &str) -> Result<Vec<u8>, ObjectStorageError>;

    /// Write an object, replacing any existing content.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStorageError>;
}

/// Errors that can occur talking to object storage.
#[derive(Debug, Clone, Error)]
pub enum ObjectStorageError {
    #[error("Object not found: {key}")]
    NotFound { key: String },

    #[error("Permission denied: {key}")]
    PermissionDenied { key: String },

    #[error("IO error: {message}")]
    Io { message: String },

    /// Any other failure reported by the storage service.
    #[error("Storage backend error: {message}")]
    Backend { message: String },
}

impl ObjectStorageError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn permission_denied(key: impl Into<String>) -> Self {
        Self::PermissionDenied { key: key.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ObjectStorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ObjectStorageError::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                ObjectStorageError::permission_denied(err.to_string())
            }
            _ => ObjectStorageError::io(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_key() {
        let err = ObjectStorageError::not_found("analysisData.json");
        assert_eq!(err.to_string(), "Object not found: analysisData.json");
    }

    #[test]
    fn backend_displays_message() {
        let err = ObjectStorageError::backend("SlowDown");
        assert!(err.to_string().contains("SlowDown"));
    }

    #[test]
    fn from_io_error_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ObjectStorageError = io_err.into();
        assert!(matches!(err, ObjectStorageError::NotFound { .. }));
    }

    #[test]
    fn from_io_error_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ObjectStorageError = io_err.into();
        assert!(matches!(err, ObjectStorageError::PermissionDenied { .. }));
    }

    #[test]
    fn from_io_error_other() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: ObjectStorageError = io_err.into();
        assert!(matches!(err, ObjectStorageError::Io { .. }));
    }

    #[test]
    fn object_storage_is_object_safe() {
        fn check<T: ObjectStorage + ?Sized>() {}
        check::<dyn ObjectStorage>();
    }
}
