//! Object storage for uploaded images.
//!
//! Handlers and services talk to [`FileStorage`] only, so the local backend
//! can be swapped for a bucket-backed one without touching business logic.
//! Rows store the public URL returned by [`FileStorage::get_url`];
//! [`FileStorage::key_from_url`] maps such a URL back to its key so deletes
//! can clean up the backing object.
//!
//! ```ignore
//! let storage = LocalFileStorage::new(PathBuf::from("./storage/uploads"), "http://localhost:3000/files".into());
//! let key = storage.save("news/abc.png", &bytes).await?;
//! let url = storage.get_url(&key)?;
//! storage.delete(&key).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::fs;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Storage backend for uploaded files.
pub trait FileStorage: Send + Sync {
    /// Stores `content` under `key` and returns the key.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Removes the object at `key`. Missing objects are not an error.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;

    /// Public URL for `key`.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;

    /// Inverse of [`get_url`](FileStorage::get_url). Returns `None` for URLs
    /// this backend did not issue (external links, other hosts).
    fn key_from_url(&self, url: &str) -> Option<String>;
}

#[derive(Debug)]
pub enum StorageError {
    /// Object is larger than the backend accepts.
    InvalidFileSize { max_bytes: usize },

    /// I/O failure in the backend.
    IoError(std::io::Error),

    /// Key is empty, absolute, escapes the root, or has odd characters.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Stores objects under a directory and serves them from `base_url`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    /// Hard ceiling enforced on every save, independent of per-upload limits.
    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_max_size(base_dir, base_url, 10 * 1024 * 1024)
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\')
        {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with a separator".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.'))
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&file_path, content).await?;

            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url, key))
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        let key = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
        Self::validate_key(key).ok()?;
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: &std::path::Path) -> LocalFileStorage {
        LocalFileStorage::with_max_size(
            dir.to_path_buf(),
            "http://localhost:3000/files/".to_string(),
            1024,
        )
    }

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStorage::validate_key("news/cover.png").is_ok());
        assert!(LocalFileStorage::validate_key("gallery/abc-123_1.jpg").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_traversal_and_absolute() {
        assert!(LocalFileStorage::validate_key("../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("\\windows").is_err());
        assert!(LocalFileStorage::validate_key("").is_err());
        assert!(LocalFileStorage::validate_key("news/ภาพ.png").is_err());
    }

    #[test]
    fn test_url_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let url = storage.get_url("staff/teacher.webp").unwrap();
        assert_eq!(url, "http://localhost:3000/files/staff/teacher.webp");
        assert_eq!(
            storage.key_from_url(&url).as_deref(),
            Some("staff/teacher.webp")
        );
    }

    #[test]
    fn test_key_from_foreign_url_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        assert!(storage.key_from_url("https://cdn.example.com/a.png").is_none());
        assert!(
            storage
                .key_from_url("http://localhost:3000/files/../secret")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let key = storage.save("events/a.png", b"png-bytes").await.unwrap();
        assert!(dir.path().join("events/a.png").exists());

        storage.delete(&key).await.unwrap();
        assert!(!dir.path().join("events/a.png").exists());

        // deleting again is not an error
        storage.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let result = storage.save("events/big.png", &[0u8; 2048]).await;
        assert!(matches!(
            result,
            Err(StorageError::InvalidFileSize { max_bytes: 1024 })
        ));
    }
}
