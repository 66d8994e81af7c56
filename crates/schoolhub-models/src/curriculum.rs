//! Curriculum programs (study plans) and curriculum activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::resource::{FieldSet, Resource, ResourceInput, urls};
use crate::validation::{validate_image_url, validate_not_blank, validate_text_list};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CurriculumProgram {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Grade span, e.g. "M.1 - M.3"
    pub grade_levels: String,
    pub highlights: Vec<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCurriculumProgramDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub grade_levels: String,
    #[serde(default)]
    #[validate(custom(function = "validate_text_list"))]
    pub highlights: Vec<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateCurriculumProgramDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("name", self.name.trim().to_string())
            .set_nullable_text("description", self.description)
            .set("grade_levels", self.grade_levels.trim().to_string())
            .set("highlights", self.highlights)
            .set_nullable_text("image_url", self.image_url)
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCurriculumProgramDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub grade_levels: Option<String>,
    #[validate(custom(function = "validate_text_list"))]
    pub highlights: Option<Vec<String>>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateCurriculumProgramDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("name", self.name.map(|v| v.trim().to_string()))
            .set_nullable_text("description", self.description)
            .set_some("grade_levels", self.grade_levels.map(|v| v.trim().to_string()))
            .set_some("highlights", self.highlights)
            .set_nullable_text("image_url", self.image_url)
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for CurriculumProgram {
    type Row = CurriculumProgram;
    type Create = CreateCurriculumProgramDto;
    type Update = UpdateCurriculumProgramDto;

    const TABLE: &'static str = "curriculum_programs";
    const NAME: &'static str = "Curriculum program";
    const SLUG: &'static str = "curriculum-programs";
    const COLUMNS: &'static str = "id, name, description, grade_levels, highlights, image_url, \
        is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(row: &CurriculumProgram) -> Vec<String> {
        urls([&row.image_url])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CurriculumActivity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCurriculumActivityDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateCurriculumActivityDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("title", self.title.trim().to_string())
            .set_nullable_text("description", self.description)
            .set_nullable_text("image_url", self.image_url)
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCurriculumActivityDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateCurriculumActivityDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("title", self.title.map(|v| v.trim().to_string()))
            .set_nullable_text("description", self.description)
            .set_nullable_text("image_url", self.image_url)
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for CurriculumActivity {
    type Row = CurriculumActivity;
    type Create = CreateCurriculumActivityDto;
    type Update = UpdateCurriculumActivityDto;

    const TABLE: &'static str = "curriculum_activities";
    const NAME: &'static str = "Curriculum activity";
    const SLUG: &'static str = "curriculum-activities";
    const COLUMNS: &'static str =
        "id, title, description, image_url, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(row: &CurriculumActivity) -> Vec<String> {
        urls([&row.image_url])
    }
}

/// `/api/public/curriculum`
#[derive(Debug, Serialize, ToSchema)]
pub struct CurriculumPage {
    pub programs: Vec<CurriculumProgram>,
    pub activities: Vec<CurriculumActivity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::FieldValue;

    #[test]
    fn test_program_highlights_validation() {
        let dto = CreateCurriculumProgramDto {
            name: "Science - Mathematics".to_string(),
            description: None,
            grade_levels: "M.4 - M.6".to_string(),
            highlights: vec!["Robotics lab".to_string()],
            image_url: None,
            is_active: None,
        };
        assert!(dto.validate().is_ok());

        let too_many = CreateCurriculumProgramDto {
            highlights: vec!["x".to_string(); 21],
            ..dto
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_highlights_written_as_list() {
        let dto = UpdateCurriculumProgramDto {
            highlights: Some(vec!["A".to_string(), "B".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            dto.into_fields().get("highlights"),
            Some(&FieldValue::TextList(vec!["A".to_string(), "B".to_string()]))
        );
    }
}
