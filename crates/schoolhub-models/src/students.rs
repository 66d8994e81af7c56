//! Student achievements and student activities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::resource::{FieldSet, Resource, ResourceInput, urls};
use crate::validation::{validate_image_url, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentAchievement {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub student_names: Option<String>,
    /// e.g. "national", "provincial"
    pub award_level: Option<String>,
    pub achieved_on: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentAchievementDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub student_names: Option<String>,
    #[validate(length(max = 100))]
    pub award_level: Option<String>,
    pub achieved_on: Option<NaiveDate>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateStudentAchievementDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("title", self.title.trim().to_string())
            .set_nullable_text("description", self.description)
            .set_nullable_text("student_names", self.student_names)
            .set_nullable_text("award_level", self.award_level)
            .set_some("achieved_on", self.achieved_on)
            .set_nullable_text("image_url", self.image_url)
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentAchievementDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub student_names: Option<String>,
    #[validate(length(max = 100))]
    pub award_level: Option<String>,
    pub achieved_on: Option<NaiveDate>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateStudentAchievementDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("title", self.title.map(|v| v.trim().to_string()))
            .set_nullable_text("description", self.description)
            .set_nullable_text("student_names", self.student_names)
            .set_nullable_text("award_level", self.award_level)
            .set_some("achieved_on", self.achieved_on)
            .set_nullable_text("image_url", self.image_url)
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for StudentAchievement {
    type Row = StudentAchievement;
    type Create = CreateStudentAchievementDto;
    type Update = UpdateStudentAchievementDto;

    const TABLE: &'static str = "student_achievements";
    const NAME: &'static str = "Student achievement";
    const SLUG: &'static str = "student-achievements";
    const COLUMNS: &'static str = "id, title, description, student_names, award_level, \
        achieved_on, image_url, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(row: &StudentAchievement) -> Vec<String> {
        urls([&row.image_url])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentActivity {
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
pub struct CreateStudentActivityDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateStudentActivityDto {
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
pub struct UpdateStudentActivityDto {
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

impl ResourceInput for UpdateStudentActivityDto {
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

impl Resource for StudentActivity {
    type Row = StudentActivity;
    type Create = CreateStudentActivityDto;
    type Update = UpdateStudentActivityDto;

    const TABLE: &'static str = "student_activities";
    const NAME: &'static str = "Student activity";
    const SLUG: &'static str = "student-activities";
    const COLUMNS: &'static str =
        "id, title, description, image_url, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(row: &StudentActivity) -> Vec<String> {
        urls([&row.image_url])
    }
}

/// `/api/public/students`
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentsPage {
    pub achievements: Vec<StudentAchievement>,
    pub activities: Vec<StudentActivity>,
}
