use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::BlobStore;
use crate::errors::{BlobError, BlobResult};

/// Process-local blob store. URLs it hands out use a `memory://` scheme and
/// cannot be fetched; they exist so list and view pages render.
#[derive(Debug)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    expiry: Duration,
}

impl MemoryBlobStore {
    pub fn new(expiry: Duration) -> Self {
        MemoryBlobStore {
            objects: Mutex::new(HashMap::new()),
            expiry,
        }
    }

    /// Copy of the stored bytes, if any.
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        MemoryBlobStore::new(Duration::from_secs(crate::config::DEFAULT_PRESIGN_EXPIRY_SECS))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload_object(&self, key: &str, content: Vec<u8>) -> BlobResult<()> {
        self.lock().insert(key.to_string(), content);
        Ok(())
    }

    async fn generate_presigned_url(&self, key: &str) -> BlobResult<String> {
        if !self.lock().contains_key(key) {
            return Err(BlobError::NotFound(key.to_string()));
        }
        Ok(format!("memory://{}?expires_in={}", key, self.expiry.as_secs()))
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
