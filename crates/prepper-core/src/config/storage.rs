//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// S3-compatible object storage configuration (MinIO in most deployments).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Endpoint URL, e.g. `http://localhost:9000`. Empty uses AWS defaults.
    #[serde(default)]
    pub endpoint: String,
    /// Region name.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket holding item photos.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing (required by MinIO).
    #[serde(default = "default_true")]
    pub force_path_style: bool,
    /// Create the bucket at startup when it does not exist.
    #[serde(default = "default_true")]
    pub ensure_bucket: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: default_bucket(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: true,
            ensure_bucket: true,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "photos".to_string()
}

fn default_true() -> bool {
    true
}
