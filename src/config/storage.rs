//! Object-storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Object-storage (S3-compatible) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// AWS region
    pub region: String,

    /// Custom endpoint for S3-compatible providers (MinIO, R2, ...)
    pub endpoint: Option<String>,

    /// Bucket holding all uploaded images
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Access key id (falls back to the ambient AWS credential chain when
    /// unset)
    pub access_key_id: Option<String>,

    /// Secret access key
    pub secret_access_key: Option<String>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.region.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__REGION"));
        }
        if self.bucket.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BUCKET"));
        }
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(ValidationError::IncompleteStorageCredentials);
        }
        Ok(())
    }
}

fn default_bucket() -> String {
    "outfits".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> StorageConfig {
        StorageConfig {
            region: "us-east-1".to_string(),
            endpoint: None,
            bucket: default_bucket(),
            access_key_id: None,
            secret_access_key: None,
        }
    }

    #[test]
    fn bucket_defaults_to_outfits() {
        assert_eq!(default_bucket(), "outfits");
    }

    #[test]
    fn validation_rejects_empty_region() {
        let config = StorageConfig {
            region: String::new(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_half_configured_credentials() {
        let config = StorageConfig {
            access_key_id: Some("AKIA...".to_string()),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_accepts_ambient_credentials() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validation_accepts_full_credentials() {
        let config = StorageConfig {
            access_key_id: Some("AKIA...".to_string()),
            secret_access_key: Some("secret".to_string()),
            ..base_config()
        };
        assert!(config.validate().is_ok());
    }
}
