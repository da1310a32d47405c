//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `ObjectStorage` - Whole-object get/put against one bucket

mod object_storage;

pub use object_storage::{ObjectStorage, ObjectStorageError};
