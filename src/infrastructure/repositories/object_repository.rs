use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("object s3://{bucket}/{key} not found")]
    NotFound { bucket: String, key: String },
    #[error("object store request failed: {0}")]
    Request(String),
}

/// Repository for key-addressed blobs in named buckets
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    /// Read the full content of `bucket/key`
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;

    /// Upload the local file at `path` as `bucket/key`
    async fn put_object(&self, bucket: &str, key: &str, path: &Path)
        -> Result<(), ObjectStoreError>;
}
