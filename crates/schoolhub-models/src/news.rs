//! News articles.

use chrono::{DateTime, Utc};
use schoolhub_core::PaginationParams;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::resource::{FieldSet, Resource, ResourceInput, urls};
use crate::validation::{validate_image_url, validate_not_blank};

fn default_category() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub category: String,
    pub cover_image_url: Option<String>,
    pub is_published: bool,
    pub published_at: DateTime<Utc>,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNewsDto {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    pub summary: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(custom(function = "validate_image_url"))]
    pub cover_image_url: Option<String>,
    /// Defaults to true
    pub is_published: Option<bool>,
    /// Defaults to now
    pub published_at: Option<DateTime<Utc>>,
}

impl ResourceInput for CreateNewsDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("title", self.title.trim().to_string())
            .set_nullable_text("summary", self.summary)
            .set("content", self.content)
            .set("category", self.category)
            .set_nullable_text("cover_image_url", self.cover_image_url)
            .set("is_published", self.is_published.unwrap_or(true))
            .set_some("published_at", self.published_at);
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateNewsDto {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    pub summary: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub cover_image_url: Option<String>,
    pub is_published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateNewsDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("title", self.title.map(|t| t.trim().to_string()))
            .set_nullable_text("summary", self.summary)
            .set_some("content", self.content)
            .set_some("category", self.category)
            .set_nullable_text("cover_image_url", self.cover_image_url)
            .set_some("is_published", self.is_published)
            .set_some("published_at", self.published_at)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for News {
    type Row = News;
    type Create = CreateNewsDto;
    type Update = UpdateNewsDto;

    const TABLE: &'static str = "news";
    const NAME: &'static str = "News item";
    const SLUG: &'static str = "news";
    const COLUMNS: &'static str = "id, title, summary, content, category, cover_image_url, \
        is_published, published_at, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ADMIN_ORDER: &'static str = "published_at DESC, created_at DESC";
    const PUBLIC_FILTER: Option<&'static str> = Some("published_at <= NOW()");

    fn image_urls(row: &News) -> Vec<String> {
        urls([&row.cover_image_url])
    }
}

/// Public news listing.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsQuery {
    pub category: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}
