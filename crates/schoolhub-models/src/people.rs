//! School administrators and teaching staff.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::resource::{FieldSet, Resource, ResourceInput, urls};
use crate::validation::{
    validate_image_url, validate_not_blank, validate_optional_email, validate_optional_phone,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Administrator {
    pub id: Uuid,
    pub full_name: String,
    pub position: String,
    pub education: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    /// Welcome message shown on the administrators page
    pub message: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdministratorDto {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub position: String,
    #[validate(length(max = 300))]
    pub education: Option<String>,
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateAdministratorDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("full_name", self.full_name.trim().to_string())
            .set("position", self.position.trim().to_string())
            .set_nullable_text("education", self.education)
            .set_nullable_text("phone", self.phone)
            .set_nullable_text("email", self.email)
            .set_nullable_text("image_url", self.image_url)
            .set_nullable_text("message", self.message)
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAdministratorDto {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub position: Option<String>,
    #[validate(length(max = 300))]
    pub education: Option<String>,
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateAdministratorDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("full_name", self.full_name.map(|v| v.trim().to_string()))
            .set_some("position", self.position.map(|v| v.trim().to_string()))
            .set_nullable_text("education", self.education)
            .set_nullable_text("phone", self.phone)
            .set_nullable_text("email", self.email)
            .set_nullable_text("image_url", self.image_url)
            .set_nullable_text("message", self.message)
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for Administrator {
    type Row = Administrator;
    type Create = CreateAdministratorDto;
    type Update = UpdateAdministratorDto;

    const TABLE: &'static str = "administrators";
    const NAME: &'static str = "Administrator";
    const SLUG: &'static str = "administrators";
    const COLUMNS: &'static str = "id, full_name, position, education, phone, email, image_url, \
        message, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(row: &Administrator) -> Vec<String> {
        urls([&row.image_url])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Staff {
    pub id: Uuid,
    pub full_name: String,
    pub position: String,
    /// Learning area, e.g. "Science"
    pub department: Option<String>,
    pub subject: Option<String>,
    pub education: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStaffDto {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub position: String,
    #[validate(length(max = 150))]
    pub department: Option<String>,
    #[validate(length(max = 150))]
    pub subject: Option<String>,
    #[validate(length(max = 300))]
    pub education: Option<String>,
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateStaffDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("full_name", self.full_name.trim().to_string())
            .set("position", self.position.trim().to_string())
            .set_nullable_text("department", self.department)
            .set_nullable_text("subject", self.subject)
            .set_nullable_text("education", self.education)
            .set_nullable_text("phone", self.phone)
            .set_nullable_text("email", self.email)
            .set_nullable_text("image_url", self.image_url)
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffDto {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub position: Option<String>,
    #[validate(length(max = 150))]
    pub department: Option<String>,
    #[validate(length(max = 150))]
    pub subject: Option<String>,
    #[validate(length(max = 300))]
    pub education: Option<String>,
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateStaffDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("full_name", self.full_name.map(|v| v.trim().to_string()))
            .set_some("position", self.position.map(|v| v.trim().to_string()))
            .set_nullable_text("department", self.department)
            .set_nullable_text("subject", self.subject)
            .set_nullable_text("education", self.education)
            .set_nullable_text("phone", self.phone)
            .set_nullable_text("email", self.email)
            .set_nullable_text("image_url", self.image_url)
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for Staff {
    type Row = Staff;
    type Create = CreateStaffDto;
    type Update = UpdateStaffDto;

    const TABLE: &'static str = "staff";
    const NAME: &'static str = "Staff member";
    const SLUG: &'static str = "staff";
    const COLUMNS: &'static str = "id, full_name, position, department, subject, education, \
        phone, email, image_url, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(row: &Staff) -> Vec<String> {
        urls([&row.image_url])
    }
}
