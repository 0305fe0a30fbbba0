//! ImageStore port for pre-signed object-storage operations.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::post::ImageKey;

/// How long a pre-signed upload URL stays valid.
pub const UPLOAD_URL_EXPIRY_SECS: u64 = 30;

/// Errors from the object store.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Pre-signing an upload URL failed.
    #[error("Failed to sign upload URL: {0}")]
    Signing(String),

    /// Deleting an object failed.
    #[error("Failed to delete object: {0}")]
    Delete(String),
}

/// Issues pre-signed URLs and deletes objects in the image bucket.
///
/// Uploads happen client-side against the signed URL; the backend never
/// holds image bytes.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Returns a pre-signed PUT URL for `key`, valid for
    /// [`UPLOAD_URL_EXPIRY_SECS`] seconds and restricted to `image/png`.
    async fn signed_upload_url(&self, key: &ImageKey) -> Result<String, StorageError>;

    /// Deletes the object under `key`. Deleting a missing object succeeds.
    async fn delete(&self, key: &ImageKey) -> Result<(), StorageError>;
}
