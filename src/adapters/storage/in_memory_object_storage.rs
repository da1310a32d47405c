//! In-Memory Object Storage Adapter
//!
//! Keeps objects in a map keyed by object key. Useful for testing and
//! development; counts every read and write it serves.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ObjectStorage, ObjectStorageError};

/// A stored object with the content type it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// In-memory storage bound to one bucket name.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStorage {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, InMemoryObject>>>,
    failing_writes: Arc<RwLock<HashSet<String>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryObjectStorage {
    /// Create an empty storage for the given bucket
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            failing_writes: Arc::new(RwLock::new(HashSet::new())),
            reads: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Place an object directly, bypassing the call counters.
    pub async fn insert(&self, key: impl Into<String>, body: impl Into<Vec<u8>>, content_type: &str) {
        self.objects.write().await.insert(
            key.into(),
            InMemoryObject {
                body: body.into(),
                content_type: content_type.to_string(),
            },
        );
    }

    /// Look at an object without counting a read.
    pub async fn object(&self, key: &str) -> Option<InMemoryObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Keys currently stored, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Make every subsequent write to `key` fail with a backend error.
    pub async fn fail_writes_to(&self, key: impl Into<String>) {
        self.failing_writes.write().await.insert(key.into());
    }

    /// Number of `get_object` calls served
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `put_object` calls served, failed ones included
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Clear all stored data and counters (useful for tests)
    pub async fn clear(&self) {
        self.objects.write().await.clear();
        self.failing_writes.write().await.clear();
        self.reads.store(0, Ordering::SeqCst);
        self.writes.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, ObjectStorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.body.clone())
            .ok_or_else(|| ObjectStorageError::not_found(key))
    }

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failing_writes.read().await.contains(key) {
            return Err(ObjectStorageError::backend(format!(
                "write to {} rejected",
                key
            )));
        }

        self.insert(key, body, content_type).await;
        Ok(())
    }
}
