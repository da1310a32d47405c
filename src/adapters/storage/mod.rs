//! Storage Adapters
//!
//! Implementations of the ObjectStorage port.
//!
//! ## Available Adapters
//!
//! - **S3ObjectStorage** - AWS S3 (or any S3-compatible endpoint)
//! - **FileObjectStorage** - One file per key on local disk (development)
//! - **InMemoryObjectStorage** - Process memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileObjectStorage, InMemoryObjectStorage, S3ObjectStorage};
//!
//! // Production: S3
//! let storage = S3ObjectStorage::from_config(&config.storage).await;
//!
//! // Local development: files on disk
//! let storage = FileObjectStorage::new("./data", "reddit-finance-analysis-data");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryObjectStorage::new("reddit-finance-analysis-data");
//! ```

mod file_object_storage;
mod in_memory_object_storage;
mod s3_object_storage;

pub use file_object_storage::FileObjectStorage;
pub use in_memory_object_storage::{InMemoryObject, InMemoryObjectStorage};
pub use s3_object_storage::S3ObjectStorage;
