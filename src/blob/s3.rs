use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use log::{error, warn};

use super::BlobStore;
use crate::errors::{BlobError, BlobResult};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

pub struct S3BlobStore {
    client: S3Client,
    bucket: String,
    expiry: Duration,
}

impl S3BlobStore {
    pub fn new(client: S3Client, bucket: String, expiry: Duration) -> Self {
        S3BlobStore { client, bucket, expiry }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload_object(&self, key: &str, content: Vec<u8>) -> BlobResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(content))
            .content_type("image/png")
            .send()
            .await
            .map_err(|err| {
                error!("S3 upload of '{}' failed: {}", key, err);
                BlobError::unavailable("error to upload s3 object", err)
            })?;
        Ok(())
    }

    async fn generate_presigned_url(&self, key: &str) -> BlobResult<String> {
        // Signing never touches the bucket, so check the object is there first.
        if let Err(err) = self.client.head_object().bucket(&self.bucket).key(key).send().await {
            if err.as_service_error().is_some_and(|e| e.is_not_found()) {
                return Err(BlobError::NotFound(key.to_string()));
            }
            return Err(BlobError::unavailable("error to get s3 object presigned url HeadObject", err));
        }

        let presigning = PresigningConfig::expires_in(self.expiry)
            .map_err(|err| BlobError::unavailable("error to get s3 object presigned url", err))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|err| BlobError::unavailable("error to get s3 object presigned url PresignGetObject", err))?;

        Ok(presigned.uri().to_string())
    }

    async fn is_healthy(&self) -> bool {
        let probe = self.client.head_bucket().bucket(&self.bucket).send();
        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, probe).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                warn!("S3 health check failed: {}", err);
                false
            }
            Err(_) => {
                warn!("S3 health check timed out after {:?}", HEALTH_CHECK_TIMEOUT);
                false
            }
        }
    }
}
