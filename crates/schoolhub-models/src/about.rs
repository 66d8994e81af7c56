//! Content of the about page: facilities and school history milestones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::resource::{FieldSet, Resource, ResourceInput, urls};
use crate::validation::{validate_image_url, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Facility {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacilityDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateFacilityDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("name", self.name.trim().to_string())
            .set_nullable_text("description", self.description)
            .set_nullable_text("image_url", self.image_url)
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFacilityDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateFacilityDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("name", self.name.map(|v| v.trim().to_string()))
            .set_nullable_text("description", self.description)
            .set_nullable_text("image_url", self.image_url)
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for Facility {
    type Row = Facility;
    type Create = CreateFacilityDto;
    type Update = UpdateFacilityDto;

    const TABLE: &'static str = "facilities";
    const NAME: &'static str = "Facility";
    const SLUG: &'static str = "facilities";
    const COLUMNS: &'static str =
        "id, name, description, image_url, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(row: &Facility) -> Vec<String> {
        urls([&row.image_url])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Milestone {
    pub id: Uuid,
    /// Year of the milestone (Gregorian)
    pub year: i32,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMilestoneDto {
    #[validate(range(min = 1800, max = 2200))]
    pub year: i32,
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateMilestoneDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("year", self.year)
            .set("title", self.title.trim().to_string())
            .set_nullable_text("description", self.description)
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMilestoneDto {
    #[validate(range(min = 1800, max = 2200))]
    pub year: Option<i32>,
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateMilestoneDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("year", self.year)
            .set_some("title", self.title.map(|v| v.trim().to_string()))
            .set_nullable_text("description", self.description)
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for Milestone {
    type Row = Milestone;
    type Create = CreateMilestoneDto;
    type Update = UpdateMilestoneDto;

    const TABLE: &'static str = "milestones";
    const NAME: &'static str = "Milestone";
    const SLUG: &'static str = "milestones";
    const COLUMNS: &'static str =
        "id, year, title, description, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";
    const PUBLIC_ORDER: &'static str = "year ASC, order_position ASC";

    fn image_urls(_row: &Milestone) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_year_range() {
        let dto = CreateMilestoneDto {
            year: 1965,
            title: "School founded".to_string(),
            description: None,
            is_active: None,
        };
        assert!(dto.validate().is_ok());

        let bad = CreateMilestoneDto { year: 99, ..dto };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_facility_requires_name() {
        let dto = CreateFacilityDto {
            name: " ".to_string(),
            description: None,
            image_url: None,
            is_active: None,
        };
        assert!(dto.validate().is_err());
    }
}
