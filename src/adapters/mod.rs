//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `storage` - ObjectStorage implementations (S3, filesystem, in-memory)
//! - `http` - Invocation endpoint for the managed API layer

pub mod http;
pub mod storage;

pub use storage::{FileObjectStorage, InMemoryObjectStorage, S3ObjectStorage};
