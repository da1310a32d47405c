//! File-based Object Storage Adapter
//!
//! Stores each object as a file named after its key, under a directory per
//! bucket. Intended for local development without an S3 endpoint.
//!
//! ```text
//! {base_path}/
//! └── {bucket}/
//!     ├── analysisData.json
//!     └── tickerAnalysis.json
//! ```
//!
//! Content types are not persisted.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{ObjectStorage, ObjectStorageError};

/// File-based object storage bound to one bucket directory
#[derive(Debug, Clone)]
pub struct FileObjectStorage {
    bucket: String,
    bucket_dir: PathBuf,
}

impl FileObjectStorage {
    /// Create a new file storage rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileObjectStorage::new("./data", "reddit-finance-analysis-data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        Self {
            bucket_dir: base_path.as_ref().join(&bucket),
            bucket,
        }
    }

    /// Path of the file backing `key`
    ///
    /// Keys are flat names; anything that would escape the bucket
    /// directory is rejected.
    fn object_path(&self, key: &str) -> Result<PathBuf, ObjectStorageError> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key == "." || key == ".." {
            return Err(ObjectStorageError::io(format!("Invalid object key: {:?}", key)));
        }
        Ok(self.bucket_dir.join(key))
    }

    /// Fresh temp path for one write; concurrent writers never share it.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.bucket_dir
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()))
    }
}

async fn write_synced(path: &Path, body: &[u8]) -> Result<(), ObjectStorageError> {
    let mut file = fs::File::create(path).await.map_err(|e| {
        ObjectStorageError::io(format!(
            "Failed to create temp file {}: {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(body).await.map_err(|e| {
        ObjectStorageError::io(format!(
            "Failed to write to temp file {}: {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().await.map_err(|e| {
        ObjectStorageError::io(format!("Failed to sync temp file {}: {}", path.display(), e))
    })
}

#[async_trait]
impl ObjectStorage for FileObjectStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, ObjectStorageError> {
        let path = self.object_path(key)?;

        match fs::read(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ObjectStorageError::not_found(key))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), ObjectStorageError> {
        let final_path = self.object_path(key)?;
        fs::create_dir_all(&self.bucket_dir).await?;

        // Write to a private temp file, then rename over the target
        let temp_path = self.temp_path(key);
        if let Err(e) = write_synced(&temp_path, &body).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(ObjectStorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            )));
        }

        Ok(())
    }
}
