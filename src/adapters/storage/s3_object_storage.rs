//! S3 Object Storage Adapter
//!
//! Production implementation of the ObjectStorage port on top of the AWS
//! SDK. Credentials and region come from the standard AWS provider chain;
//! `endpoint_url` and `force_path_style` allow S3-compatible services.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;
use crate::ports::{ObjectStorage, ObjectStorageError};

/// Error codes S3 uses for authorization failures.
const ACCESS_DENIED_CODES: &[&str] = &["AccessDenied", "AllAccessDisabled", "InvalidAccessKeyId"];

/// S3-backed storage bound to one bucket
#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
}

impl S3ObjectStorage {
    /// Wrap an existing client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the environment plus the storage overrides.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let shared_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(config.force_path_style);
        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        tracing::debug!(
            bucket = %config.bucket_name,
            region = ?shared_config.region(),
            endpoint = ?config.endpoint_url,
            "S3 client configured"
        );

        Self::new(Client::from_conf(builder.build()), config.bucket_name.clone())
    }
}

/// Map an S3 error code to the port's taxonomy.
fn classify(key: &str, code: Option<&str>, message: String) -> ObjectStorageError {
    match code {
        Some("NoSuchKey") | Some("NotFound") => ObjectStorageError::not_found(key),
        Some(code) if ACCESS_DENIED_CODES.contains(&code) => {
            ObjectStorageError::permission_denied(key)
        }
        _ => ObjectStorageError::backend(message),
    }
}

/// `Code: message` when S3 supplied both, otherwise the full error chain.
fn describe<E>(err: &E) -> String
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        _ => DisplayErrorContext(err).to_string(),
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, ObjectStorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_no_such_key() {
                    return ObjectStorageError::not_found(key);
                }
                classify(key, err.code(), describe(&err))
            })?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| ObjectStorageError::io(format!("Failed to read body of {}: {}", key, e)))?;

        Ok(body.into_bytes().to_vec())
    }

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                classify(key, err.code(), describe(&err))
            })?;

        Ok(())
    }
}
