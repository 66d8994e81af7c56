//! Upload storage configuration.
//!
//! - `STORAGE_DIR`: directory holding uploaded objects (default `storage/uploads`)
//! - `STORAGE_BASE_URL`: public prefix objects are served under
//!   (default `http://localhost:3000/files`)
//! - `UPLOAD_MAX_SIZE_MB`: ceiling for a single upload (default 5)

use std::env;
use std::path::PathBuf;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub base_url: String,
    pub max_upload_mb: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            dir: PathBuf::from(
                env::var("STORAGE_DIR").unwrap_or_else(|_| "storage/uploads".to_string()),
            ),
            base_url: env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/files".to_string()),
            max_upload_mb: env_or("UPLOAD_MAX_SIZE_MB", 5),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("storage/uploads"),
            base_url: "http://localhost:3000/files".to_string(),
            max_upload_mb: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_upload_bytes() {
        let config = StorageConfig::default();
        assert_eq!(config.max_upload_bytes(), 5 * 1024 * 1024);
    }
}
