//! In-Memory Image Store Adapter
//!
//! Tracks signed and deleted keys in memory instead of talking to an
//! object store. Useful for testing and development.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::post::ImageKey;
use crate::ports::{ImageStore, StorageError};

/// In-memory image store that records operations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    signed: Arc<RwLock<Vec<String>>>,
    deleted: Arc<RwLock<Vec<String>>>,
    failing: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryImageStore {
    /// Create a new in-memory image store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation on `key` fail.
    pub async fn fail_for(&self, key: &ImageKey) {
        self.failing.write().await.insert(key.as_str().to_string());
    }

    /// Stop failing operations on `key`.
    pub async fn recover(&self, key: &ImageKey) {
        self.failing.write().await.remove(key.as_str());
    }

    /// Keys that have had upload URLs signed, in order.
    pub async fn signed_keys(&self) -> Vec<String> {
        self.signed.read().await.clone()
    }

    /// Keys that have been deleted, in order.
    pub async fn deleted_keys(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn signed_upload_url(&self, key: &ImageKey) -> Result<String, StorageError> {
        if self.failing.read().await.contains(key.as_str()) {
            return Err(StorageError::Signing("simulated failure".to_string()));
        }

        self.signed.write().await.push(key.as_str().to_string());
        Ok(format!("https://storage.test/upload/{}", key.as_str()))
    }

    async fn delete(&self, key: &ImageKey) -> Result<(), StorageError> {
        if self.failing.read().await.contains(key.as_str()) {
            return Err(StorageError::Delete("simulated failure".to_string()));
        }

        self.deleted.write().await.push(key.as_str().to_string());
        Ok(())
    }
}
