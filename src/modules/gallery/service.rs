use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use schoolhub_core::{AppError, FileStorage};
use schoolhub_db::{OrderScope, next_order_position};

use crate::modules::content::ContentService;
use crate::modules::uploads::UploadService;
use crate::utils::sql::{update_statement, write_error};

use super::model::{
    AddPhotosDto, AlbumSummary, AlbumWithPhotos, GalleryAlbum, GalleryPhoto, PHOTO_COLUMNS,
    UpdatePhotoDto,
};

fn photo_scope(album_id: Uuid) -> OrderScope {
    OrderScope::Parent {
        table: "gallery_photos",
        column: "album_id",
        id: album_id,
    }
}

fn album_not_found() -> AppError {
    AppError::not_found(anyhow!("Album not found"))
}

pub struct GalleryService;

impl GalleryService {
    /// Published albums with their photo count; the cover falls back to the
    /// first photo.
    #[instrument(skip(db))]
    pub async fn list_public_albums(db: &PgPool) -> Result<Vec<AlbumSummary>, AppError> {
        let albums = sqlx::query_as::<_, AlbumSummary>(
            r#"SELECT
                a.id,
                a.title,
                a.description,
                COALESCE(
                    a.cover_image_url,
                    (SELECT fp.image_url FROM gallery_photos fp
                     WHERE fp.album_id = a.id
                     ORDER BY fp.order_position ASC LIMIT 1)
                ) AS cover_image_url,
                a.event_date,
                COUNT(p.id) AS photo_count,
                a.created_at
               FROM gallery_albums a
               LEFT JOIN gallery_photos p ON p.album_id = a.id
               WHERE a.is_published = TRUE
               GROUP BY a.id
               ORDER BY a.order_position ASC"#,
        )
        .fetch_all(db)
        .await?;

        Ok(albums)
    }

    #[instrument(skip(db))]
    pub async fn get_public_album(db: &PgPool, id: Uuid) -> Result<AlbumWithPhotos, AppError> {
        let album = ContentService::get_public::<GalleryAlbum>(db, id).await?;
        let photos = Self::list_photos(db, id).await?;
        Ok(AlbumWithPhotos { album, photos })
    }

    #[instrument(skip(db))]
    pub async fn get_album_with_photos(
        db: &PgPool,
        id: Uuid,
    ) -> Result<AlbumWithPhotos, AppError> {
        let album = ContentService::get::<GalleryAlbum>(db, id).await?;
        let photos = Self::list_photos(db, id).await?;
        Ok(AlbumWithPhotos { album, photos })
    }

    #[instrument(skip(db))]
    pub async fn list_photos(db: &PgPool, album_id: Uuid) -> Result<Vec<GalleryPhoto>, AppError> {
        let photos = sqlx::query_as::<_, GalleryPhoto>(&format!(
            "SELECT {} FROM gallery_photos WHERE album_id = $1 ORDER BY order_position ASC",
            PHOTO_COLUMNS
        ))
        .bind(album_id)
        .fetch_all(db)
        .await?;

        Ok(photos)
    }

    #[instrument(skip(db))]
    pub async fn ensure_album(db: &PgPool, album_id: Uuid) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM gallery_albums WHERE id = $1)",
        )
        .bind(album_id)
        .fetch_one(db)
        .await?;

        if exists { Ok(()) } else { Err(album_not_found()) }
    }

    /// Appends photos for already uploaded images, in request order.
    #[instrument(skip(db, dto), fields(count = dto.image_urls.len()))]
    pub async fn add_photos(
        db: &PgPool,
        album_id: Uuid,
        dto: AddPhotosDto,
    ) -> Result<Vec<GalleryPhoto>, AppError> {
        Self::ensure_album(db, album_id).await?;

        let caption = dto
            .caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let mut tx = db.begin().await?;
        let first = next_order_position(&mut tx, photo_scope(album_id)).await?;

        let mut photos = Vec::with_capacity(dto.image_urls.len());
        for (offset, url) in dto.image_urls.into_iter().enumerate() {
            let photo = sqlx::query_as::<_, GalleryPhoto>(&format!(
                "INSERT INTO gallery_photos (album_id, image_url, caption, order_position)
                 VALUES ($1, $2, $3, $4)
                 RETURNING {}",
                PHOTO_COLUMNS
            ))
            .bind(album_id)
            .bind(url.trim())
            .bind(&caption)
            .bind(first + offset as i32)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| write_error(e, "Photo"))?;
            photos.push(photo);
        }

        tx.commit().await?;

        info!(album_id = %album_id, added = photos.len(), "Photos added");
        Ok(photos)
    }

    /// Inserts one photo at the end of the album.
    #[instrument(skip(db))]
    pub async fn insert_photo(
        db: &PgPool,
        album_id: Uuid,
        image_url: &str,
        caption: Option<&str>,
    ) -> Result<GalleryPhoto, AppError> {
        let mut tx = db.begin().await?;
        let position = next_order_position(&mut tx, photo_scope(album_id)).await?;

        let photo = sqlx::query_as::<_, GalleryPhoto>(&format!(
            "INSERT INTO gallery_photos (album_id, image_url, caption, order_position)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            PHOTO_COLUMNS
        ))
        .bind(album_id)
        .bind(image_url)
        .bind(caption)
        .bind(position)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error(e, "Photo"))?;

        tx.commit().await?;
        Ok(photo)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_photo(
        db: &PgPool,
        id: Uuid,
        dto: UpdatePhotoDto,
    ) -> Result<GalleryPhoto, AppError> {
        update_statement("gallery_photos", id, dto.into_fields(), PHOTO_COLUMNS)
            .build_query_as::<GalleryPhoto>()
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Photo not found")))
    }

    #[instrument(skip(db, storage))]
    pub async fn delete_photo(
        db: &PgPool,
        storage: &dyn FileStorage,
        id: Uuid,
    ) -> Result<(), AppError> {
        let image_url = sqlx::query_scalar::<_, String>(
            "DELETE FROM gallery_photos WHERE id = $1 RETURNING image_url",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Photo not found")))?;

        UploadService::cleanup_urls(storage, &[image_url]).await;
        Ok(())
    }

    pub async fn count_photos(db: &PgPool) -> Result<i64, AppError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gallery_photos")
            .fetch_one(db)
            .await?)
    }
}
