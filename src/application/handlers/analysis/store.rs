//! AnalysisDataStore - get/update of analysis data in object storage.
//!
//! The store is generic over a [`StorageLayout`], so the key mapping is
//! fixed at compile time for a given deployment. Every call is sequential:
//! keys are read or written one at a time in the layout's order and the
//! first failure aborts the call.
//!
//! # Concurrency
//!
//! Nothing is locked. With [`PerFieldDocuments`] an update is two
//! independent writes, so two concurrent updates can interleave and leave
//! one field from each caller. A failure after the first write leaves the
//! first field updated. Both are accepted behaviour of the per-field
//! layout; use [`SingleDocument`] where a consistent snapshot matters.
//!
//! [`PerFieldDocuments`]: crate::domain::analysis::PerFieldDocuments
//! [`SingleDocument`]: crate::domain::analysis::SingleDocument

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::analysis::{
    AnalysisStoreError, LayoutKind, StorageLayout, StoredObject, JSON_CONTENT_TYPE,
};
use crate::ports::ObjectStorage;

/// Reads and writes analysis data through one storage layout.
pub struct AnalysisDataStore<L: StorageLayout> {
    storage: Arc<dyn ObjectStorage>,
    _layout: PhantomData<fn() -> L>,
}

impl<L: StorageLayout> AnalysisDataStore<L> {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            storage,
            _layout: PhantomData,
        }
    }

    pub fn layout(&self) -> LayoutKind {
        L::KIND
    }

    pub fn bucket(&self) -> &str {
        self.storage.bucket()
    }

    /// Read every key of the layout and reassemble the data.
    ///
    /// # Errors
    ///
    /// - `StorageRead` if any key cannot be fetched, including a missing key
    /// - `MalformedPayload` if a stored document does not parse
    #[instrument(skip(self), fields(bucket = %self.storage.bucket(), layout = %L::KIND))]
    pub async fn get(&self) -> Result<L::Data, AnalysisStoreError> {
        let mut objects = Vec::with_capacity(L::KEYS.len());
        for &key in L::KEYS {
            let body = self
                .storage
                .get_object(key)
                .await
                .map_err(|e| AnalysisStoreError::read(key, e))?;
            debug!(key, bytes = body.len(), "Read analysis object");
            objects.push(StoredObject::new(key, body));
        }

        L::decode(objects)
    }

    /// Overwrite every key of the layout with `data` and hand `data` back.
    ///
    /// # Errors
    ///
    /// - `Serialization` if `data` cannot be encoded (nothing is written)
    /// - `StorageWrite` on the first failed write; earlier writes stay
    #[instrument(skip(self, data), fields(bucket = %self.storage.bucket(), layout = %L::KIND))]
    pub async fn update(&self, data: L::Data) -> Result<L::Data, AnalysisStoreError> {
        for object in L::encode(&data)? {
            let bytes = object.body.len();
            self.storage
                .put_object(object.key, object.body, JSON_CONTENT_TYPE)
                .await
                .map_err(|e| AnalysisStoreError::write(object.key, e))?;
            debug!(key = object.key, bytes, "Wrote analysis object");
        }

        Ok(data)
    }
}

impl<L: StorageLayout> Clone for AnalysisDataStore<L> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.storage))
    }
}
