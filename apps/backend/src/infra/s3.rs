//! Presigned S3 PUT URLs for image uploads.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::error::AppError;
use crate::services::uploads::UploadSigner;

#[derive(Debug, Clone)]
pub struct S3UploadSigner {
    client: Client,
}

impl S3UploadSigner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Credentials and region from the standard AWS provider chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::internal(format!("invalid presign expiry: {e}")))?;

        let request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::upstream(format!("failed to presign upload: {e}")))?;

        Ok(request.uri().to_string())
    }
}
