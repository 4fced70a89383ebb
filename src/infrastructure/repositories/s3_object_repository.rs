use super::object_repository::{ObjectRepository, ObjectStoreError};
use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use std::path::Path;
use std::sync::Arc;

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// AWS S3 implementation of the object repository
pub struct S3ObjectRepository {
    s3_client: Arc<S3Client>,
}

impl S3ObjectRepository {
    pub fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl ObjectRepository for S3ObjectRepository {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let output = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    return ObjectStoreError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    };
                }
                tracing::error!(
                    error = ?e,
                    bucket = bucket,
                    key = key,
                    "AWS S3 get_object failed"
                );
                ObjectStoreError::Request(format!("AWS S3 error: {}", e))
            })?;

        let body = output.body.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read S3 object body");
            ObjectStoreError::Request(format!("Failed to read object body: {}", e))
        })?;

        Ok(body.into_bytes().to_vec())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
    ) -> Result<(), ObjectStoreError> {
        let body = ByteStream::from_path(path).await.map_err(|e| {
            ObjectStoreError::Request(format!(
                "Failed to open {} for upload: {}",
                path.display(),
                e
            ))
        })?;

        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(AUDIO_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    bucket = bucket,
                    key = key,
                    "AWS S3 put_object failed"
                );
                ObjectStoreError::Request(format!("AWS S3 error: {}", e))
            })?;

        Ok(())
    }
}
