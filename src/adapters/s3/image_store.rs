//! S3-backed implementation of the ImageStore port.
//!
//! Works against AWS S3 or any S3-compatible endpoint (MinIO, R2) via
//! the configurable endpoint override.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;
use crate::domain::post::ImageKey;
use crate::ports::{ImageStore, StorageError, UPLOAD_URL_EXPIRY_SECS};

const IMAGE_CONTENT_TYPE: &str = "image/png";

/// S3 implementation of ImageStore.
#[derive(Clone)]
pub struct S3ImageStore {
    client: Client,
    bucket: String,
}

impl S3ImageStore {
    /// Builds an S3 client from the storage configuration.
    ///
    /// When no static credentials are configured, the ambient AWS
    /// credential chain is used instead.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(key_id), Some(secret)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader
                .credentials_provider(Credentials::new(key_id, secret, None, None, "wardrobe"));
        }

        let shared_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint {
            if !endpoint.trim().is_empty() {
                builder = builder.endpoint_url(endpoint).force_path_style(true);
            }
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn signed_upload_url(&self, key: &ImageKey) -> Result<String, StorageError> {
        let presign_cfg = PresigningConfig::builder()
            .expires_in(Duration::from_secs(UPLOAD_URL_EXPIRY_SECS))
            .build()
            .map_err(|e| StorageError::Signing(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .content_type(IMAGE_CONTENT_TYPE)
            .presigned(presign_cfg)
            .await
            .map_err(|e| StorageError::Signing(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    async fn delete(&self, key: &ImageKey) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;

        Ok(())
    }
}
