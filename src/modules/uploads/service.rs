use anyhow::anyhow;
use image::ImageFormat;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use schoolhub_core::{AppError, FileStorage, StorageError};
use schoolhub_models::validation::validate_folder_name;

use crate::metrics::{track_storage_cleanup_failure, track_upload, track_upload_rejected};
use crate::modules::uploads::model::UploadResponse;

const MIB: usize = 1024 * 1024;

/// Image formats accepted for upload, with the extension stored objects get.
const ALLOWED_TYPES: &[(&str, ImageFormat, &str)] = &[
    ("image/png", ImageFormat::Png, "png"),
    ("image/jpeg", ImageFormat::Jpeg, "jpg"),
    ("image/webp", ImageFormat::WebP, "webp"),
    ("image/gif", ImageFormat::Gif, "gif"),
];

/// Limits applied to one upload before anything reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl UploadPolicy {
    /// The requested limit can only lower the server ceiling.
    pub fn new(server_max_bytes: usize, requested_max_mb: Option<usize>) -> Self {
        let max_bytes = match requested_max_mb {
            Some(mb) if mb > 0 => server_max_bytes.min(mb.saturating_mul(MIB)),
            _ => server_max_bytes,
        };
        Self { max_bytes }
    }

    /// Returns the file extension for the accepted content type.
    pub fn check(
        &self,
        folder: &str,
        content_type: Option<&str>,
        content: &[u8],
    ) -> Result<&'static str, AppError> {
        if validate_folder_name(folder).is_err() {
            track_upload_rejected("folder");
            return Err(AppError::field(
                "folder",
                "Folder must be 1-32 characters of a-z, 0-9, _ or -",
            ));
        }

        if content.is_empty() {
            track_upload_rejected("empty");
            return Err(AppError::field("file", "File is empty"));
        }

        if content.len() > self.max_bytes {
            track_upload_rejected("size");
            return Err(AppError::field(
                "file",
                format!(
                    "File is {:.1} MB, the limit is {:.1} MB",
                    content.len() as f64 / MIB as f64,
                    self.max_bytes as f64 / MIB as f64
                ),
            ));
        }

        let content_type = content_type.unwrap_or_default();
        let Some(&(mime, format, extension)) =
            ALLOWED_TYPES.iter().find(|(m, _, _)| *m == content_type)
        else {
            track_upload_rejected("mime");
            return Err(AppError::field(
                "file",
                "Only PNG, JPEG, WebP and GIF images are allowed",
            ));
        };

        if image::guess_format(content).ok() != Some(format) {
            track_upload_rejected("format");
            return Err(AppError::field(
                "file",
                format!("File content is not a valid {}", mime),
            ));
        }

        // A matching header is not enough: the whole image has to decode.
        if let Err(e) = image::load_from_memory_with_format(content, format) {
            track_upload_rejected("decode");
            warn!(error = %e, mime, "Uploaded image failed to decode");
            return Err(AppError::field(
                "file",
                format!("File content is not a valid {}", mime),
            ));
        }

        Ok(extension)
    }
}

pub struct UploadService;

impl UploadService {
    /// Validates and stores one image under `folder/<uuid>.<ext>`.
    #[instrument(skip(storage, content), fields(size = content.len()))]
    pub async fn store(
        storage: &dyn FileStorage,
        policy: UploadPolicy,
        folder: &str,
        content_type: Option<&str>,
        content: &[u8],
    ) -> Result<UploadResponse, AppError> {
        let extension = policy.check(folder, content_type, content)?;

        let key = format!("{}/{}.{}", folder, Uuid::new_v4(), extension);
        let key = storage.save(&key, content).await.map_err(storage_error)?;
        let url = storage.get_url(&key).map_err(storage_error)?;

        track_upload(folder, content.len());
        info!(key = %key, "Image stored");

        Ok(UploadResponse { key, url })
    }

    /// Deletes an object we issued. URLs from elsewhere are ignored.
    #[instrument(skip(storage))]
    pub async fn delete_by_url(storage: &dyn FileStorage, url: &str) -> Result<bool, AppError> {
        let Some(key) = storage.key_from_url(url) else {
            return Ok(false);
        };
        storage.delete(&key).await.map_err(storage_error)?;
        Ok(true)
    }

    /// Best-effort removal of the objects behind `urls`; failures are logged.
    pub async fn cleanup_urls(storage: &dyn FileStorage, urls: &[String]) {
        for url in urls {
            let Some(key) = storage.key_from_url(url) else {
                continue;
            };
            if let Err(e) = storage.delete(&key).await {
                track_storage_cleanup_failure();
                warn!(key = %key, error = %e, "Failed to delete stored object");
            }
        }
    }
}

fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::InvalidFileSize { .. } => AppError::field("file", err.to_string()),
        StorageError::InvalidKey(_) => AppError::bad_request(anyhow!(err.to_string())),
        StorageError::IoError(_) => AppError::internal(err),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::StatusCode;
    use schoolhub_core::file_storage::StorageFuture;

    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            4,
            4,
            image::Rgb([200, 30, 30]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[derive(Default)]
    struct CountingStorage {
        saves: AtomicUsize,
        deleted: Mutex<Vec<String>>,
    }

    impl FileStorage for CountingStorage {
        fn save<'a>(&'a self, key: &'a str, _content: &'a [u8]) -> StorageFuture<'a, String> {
            Box::pin(async move {
                self.saves.fetch_add(1, Ordering::SeqCst);
                Ok(key.to_string())
            })
        }

        fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
            Box::pin(async move {
                self.deleted.lock().unwrap().push(key.to_string());
                Ok(())
            })
        }

        fn get_url(&self, key: &str) -> Result<String, StorageError> {
            Ok(format!("http://files.test/{}", key))
        }

        fn key_from_url(&self, url: &str) -> Option<String> {
            url.strip_prefix("http://files.test/").map(str::to_string)
        }
    }

    fn forged_png(bytes: usize) -> Vec<u8> {
        let mut content = PNG_HEADER.to_vec();
        content.resize(bytes, 0);
        content
    }

    #[test]
    fn test_policy_takes_the_smaller_limit() {
        assert_eq!(UploadPolicy::new(10 * MIB, Some(5)).max_bytes, 5 * MIB);
        assert_eq!(UploadPolicy::new(10 * MIB, Some(50)).max_bytes, 10 * MIB);
        assert_eq!(UploadPolicy::new(10 * MIB, None).max_bytes, 10 * MIB);
        assert_eq!(UploadPolicy::new(10 * MIB, Some(0)).max_bytes, 10 * MIB);
    }

    #[test]
    fn test_check_rejects_bad_input() {
        let policy = UploadPolicy::new(MIB, None);
        let png = encode(ImageFormat::Png);

        assert_eq!(policy.check("news", Some("image/png"), &png).unwrap(), "png");
        assert!(policy.check("News", Some("image/png"), &png).is_err());
        assert!(policy.check("../etc", Some("image/png"), &png).is_err());
        assert!(policy.check("news", Some("application/pdf"), &png).is_err());
        assert!(policy.check("news", None, &png).is_err());
        assert!(policy.check("news", Some("image/jpeg"), &png).is_err());
        assert!(policy.check("news", Some("image/png"), &[]).is_err());
    }

    #[test]
    fn test_check_accepts_each_format() {
        let policy = UploadPolicy::new(MIB, None);

        let jpeg = encode(ImageFormat::Jpeg);
        assert_eq!(policy.check("staff", Some("image/jpeg"), &jpeg).unwrap(), "jpg");
        let gif = encode(ImageFormat::Gif);
        assert_eq!(policy.check("staff", Some("image/gif"), &gif).unwrap(), "gif");
        let webp = encode(ImageFormat::WebP);
        assert_eq!(policy.check("staff", Some("image/webp"), &webp).unwrap(), "webp");
    }

    #[test]
    fn test_check_rejects_forged_header() {
        let policy = UploadPolicy::new(MIB, None);

        let err = policy
            .check("news", Some("image/png"), &forged_png(2048))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.fields.unwrap().contains_key("file"));

        let mut truncated = encode(ImageFormat::Png);
        truncated.truncate(truncated.len() / 2);
        assert!(policy.check("news", Some("image/png"), &truncated).is_err());
    }

    #[tokio::test]
    async fn test_oversized_upload_never_reaches_storage() {
        let storage = CountingStorage::default();
        let policy = UploadPolicy::new(10 * MIB, Some(5));

        let err = UploadService::store(
            &storage,
            policy,
            "news",
            Some("image/png"),
            &forged_png(6 * MIB),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.fields.unwrap().contains_key("file"));
        assert_eq!(storage.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_returns_key_and_url() {
        let storage = CountingStorage::default();
        let policy = UploadPolicy::new(MIB, None);

        let png = encode(ImageFormat::Png);
        let uploaded = UploadService::store(&storage, policy, "staff", Some("image/png"), &png)
            .await
            .unwrap();

        assert!(uploaded.key.starts_with("staff/"));
        assert!(uploaded.key.ends_with(".png"));
        assert_eq!(uploaded.url, format!("http://files.test/{}", uploaded.key));
        assert_eq!(storage.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cleanup_skips_foreign_urls() {
        let storage = CountingStorage::default();
        UploadService::cleanup_urls(
            &storage,
            &[
                "http://files.test/news/a.png".to_string(),
                "https://cdn.example.com/b.png".to_string(),
            ],
        )
        .await;

        assert_eq!(*storage.deleted.lock().unwrap(), vec!["news/a.png".to_string()]);
    }
}
