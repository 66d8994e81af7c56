//! Frequently asked questions shown on the contact page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::resource::{FieldSet, Resource, ResourceInput};
use crate::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFaqDto {
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub question: String,
    #[validate(length(min = 1, max = 5000), custom(function = "validate_not_blank"))]
    pub answer: String,
    pub is_active: Option<bool>,
}

impl ResourceInput for CreateFaqDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("question", self.question.trim().to_string())
            .set("answer", self.answer.trim().to_string())
            .set("is_active", self.is_active.unwrap_or(true));
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFaqDto {
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub question: Option<String>,
    #[validate(length(min = 1, max = 5000), custom(function = "validate_not_blank"))]
    pub answer: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateFaqDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("question", self.question.map(|v| v.trim().to_string()))
            .set_some("answer", self.answer.map(|v| v.trim().to_string()))
            .set_some("is_active", self.is_active)
            .set_some("order_position", self.order_position);
        fields
    }
}

impl Resource for Faq {
    type Row = Faq;
    type Create = CreateFaqDto;
    type Update = UpdateFaqDto;

    const TABLE: &'static str = "faqs";
    const NAME: &'static str = "FAQ item";
    const SLUG: &'static str = "faqs";
    const COLUMNS: &'static str =
        "id, question, answer, is_active, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ADMIN_ORDER: &'static str = "order_position ASC";

    fn image_urls(_row: &Faq) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::FieldValue;

    #[test]
    fn test_create_faq() {
        let dto = CreateFaqDto {
            question: "  When does enrollment open?  ".to_string(),
            answer: "In March.".to_string(),
            is_active: None,
        };
        assert!(dto.validate().is_ok());

        let fields = dto.into_fields();
        assert_eq!(
            fields.get("question"),
            Some(&FieldValue::Text(Some("When does enrollment open?".to_string())))
        );
        assert_eq!(fields.get("is_active"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_blank_answer_rejected() {
        let dto = CreateFaqDto {
            question: "Q".to_string(),
            answer: "   ".to_string(),
            is_active: Some(false),
        };
        assert!(dto.validate().is_err());
    }
}
