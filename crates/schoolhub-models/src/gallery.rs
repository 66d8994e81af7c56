//! Photo albums and their photos.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::resource::{ChildTable, FieldSet, Resource, ResourceInput, urls};
use crate::validation::{validate_http_url, validate_image_url, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GalleryAlbum {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub is_published: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlbumDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub cover_image_url: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub is_published: Option<bool>,
}

impl ResourceInput for CreateAlbumDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("title", self.title.trim().to_string())
            .set_nullable_text("description", self.description)
            .set_nullable_text("cover_image_url", self.cover_image_url)
            .set_some("event_date", self.event_date)
            .set("is_published", self.is_published.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAlbumDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub cover_image_url: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub is_published: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateAlbumDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("title", self.title.map(|v| v.trim().to_string()))
            .set_nullable_text("description", self.description)
            .set_nullable_text("cover_image_url", self.cover_image_url)
            .set_some("event_date", self.event_date)
            .set_some("is_published", self.is_published)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for GalleryAlbum {
    type Row = GalleryAlbum;
    type Create = CreateAlbumDto;
    type Update = UpdateAlbumDto;

    const TABLE: &'static str = "gallery_albums";
    const NAME: &'static str = "Album";
    const SLUG: &'static str = "gallery-albums";
    const COLUMNS: &'static str = "id, title, description, cover_image_url, event_date, \
        is_published, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ADMIN_ORDER: &'static str = "order_position ASC";
    const CHILDREN: &'static [ChildTable] = &[ChildTable {
        table: "gallery_photos",
        foreign_key: "album_id",
        image_column: Some("image_url"),
    }];

    fn image_urls(row: &GalleryAlbum) -> Vec<String> {
        urls([&row.cover_image_url])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GalleryPhoto {
    pub id: Uuid,
    pub album_id: Uuid,
    pub image_url: String,
    pub caption: Option<String>,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Album card on the public gallery page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AlbumSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Explicit cover, else the first photo
    pub cover_image_url: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub photo_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumWithPhotos {
    #[serde(flatten)]
    pub album: GalleryAlbum,
    pub photos: Vec<GalleryPhoto>,
}

fn validate_photo_urls(urls: &[String]) -> Result<(), ValidationError> {
    for url in urls {
        validate_http_url(url)?;
    }
    Ok(())
}

/// Registers already uploaded images as photos of an album.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddPhotosDto {
    #[validate(
        length(min = 1, max = 100, message = "Provide between 1 and 100 image URLs"),
        custom(function = "validate_photo_urls")
    )]
    pub image_urls: Vec<String>,
    #[validate(length(max = 500))]
    pub caption: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePhotoDto {
    #[validate(length(max = 500))]
    pub caption: Option<String>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl UpdatePhotoDto {
    pub fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_nullable_text("caption", self.caption)
            .set_some("order_position", self.order_position);
        fields
    }
}

/// A file of a bulk upload that was not stored.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RejectedUpload {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkUploadResponse {
    pub uploaded: Vec<GalleryPhoto>,
    pub rejected: Vec<RejectedUpload>,
}
