//! Object storage configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::LayoutKind;

/// Which ObjectStorage adapter to build
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    S3,
    Filesystem,
    Memory,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding the analysis objects
    pub bucket_name: String,

    /// Key layout used by this deployment
    #[serde(default)]
    pub layout: LayoutKind,

    #[serde(default)]
    pub backend: StorageBackend,

    /// AWS region override (otherwise from the provider chain)
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    pub endpoint_url: Option<String>,

    #[serde(default)]
    pub force_path_style: bool,

    /// Root directory for the filesystem backend
    pub local_path: Option<String>,
}

impl StorageConfig {
    /// Minimal config for the given bucket, everything else defaulted.
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            layout: LayoutKind::default(),
            backend: StorageBackend::default(),
            region: None,
            endpoint_url: None,
            force_path_style: false,
            local_path: None,
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bucket_name.is_empty() {
            return Err(ValidationError::MissingRequired("storage.bucket_name"));
        }
        if !is_valid_bucket_name(&self.bucket_name) {
            return Err(ValidationError::InvalidBucketName);
        }
        if let Some(endpoint) = &self.endpoint_url {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidEndpointUrl);
            }
        }
        if self.backend == StorageBackend::Filesystem
            && self.local_path.as_deref().map_or(true, str::is_empty)
        {
            return Err(ValidationError::MissingRequired("storage.local_path"));
        }
        Ok(())
    }
}

/// S3 bucket naming: 3-63 chars of lowercase letters, digits, `.` and `-`,
/// beginning and ending with a letter or digit.
fn is_valid_bucket_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if !(3..=63).contains(&bytes.len()) {
        return false;
    }
    let edge_ok = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    edge_ok(&bytes[0])
        && edge_ok(&bytes[bytes.len() - 1])
        && bytes
            .iter()
            .all(|b| edge_ok(b) || *b == b'.' || *b == b'-')
}
