//! Binary photo storage.
//!
//! Photos live under `employee_pic/<employee id>.png`, so saving a new photo
//! for the same employee overwrites the previous one. Deleting an employee
//! leaves its photo behind.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::config::Config;
use crate::errors::BlobResult;

pub mod memory;
pub mod s3;

pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

pub const PHOTO_KEY_PREFIX: &str = "employee_pic/";

pub fn photo_key(employee_id: &str) -> String {
    format!("{}{}.png", PHOTO_KEY_PREFIX, employee_id)
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `content` under `key`, replacing anything already there.
    async fn upload_object(&self, key: &str, content: Vec<u8>) -> BlobResult<()>;

    /// Short-lived URL the browser can fetch the object from. Fails when the
    /// object is missing.
    async fn generate_presigned_url(&self, key: &str) -> BlobResult<String>;

    async fn is_healthy(&self) -> bool;
}

/// Picks S3 when a bucket is configured, otherwise keeps photos in memory.
pub async fn build_blob_store(config: &Config) -> Arc<dyn BlobStore> {
    match &config.photos_bucket {
        Some(bucket) => {
            info!("Storing photos in S3 bucket '{}'", bucket);
            let sdk_config = crate::utils::aws::load_sdk_config(config).await;
            Arc::new(S3BlobStore::new(
                aws_sdk_s3::Client::new(&sdk_config),
                bucket.clone(),
                config.presign_expiry,
            ))
        }
        None => {
            info!("PHOTOS_BUCKET not set, storing photos in memory");
            Arc::new(MemoryBlobStore::new(config.presign_expiry))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_key_is_deterministic_per_employee() {
        assert_eq!(photo_key("17"), "employee_pic/17.png");
        assert_eq!(photo_key("17"), photo_key("17"));
        assert_ne!(photo_key("17"), photo_key("18"));
    }
}
