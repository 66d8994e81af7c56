//! Messages sent from the public contact form.

use chrono::{DateTime, Utc};
use schoolhub_core::{PaginationMeta, PaginationParams};
use schoolhub_core::serde::deserialize_optional_bool;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::faqs::Faq;
use crate::validation::{validate_not_blank, validate_optional_phone};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub const CONTACT_MESSAGE_COLUMNS: &str =
    "id, name, email, phone, subject, message, is_read, read_at, created_at";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactMessageDto {
    #[validate(
        length(min = 1, max = 150, message = "Name must be 1-150 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: Option<String>,
    #[validate(
        length(min = 1, max = 200, message = "Subject must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub subject: String,
    #[validate(
        length(min = 1, max = 5000, message = "Message must be 1-5000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactMessageFilterParams {
    /// Only unread messages
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub unread_only: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedContactMessagesResponse {
    pub data: Vec<ContactMessage>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkReadDto {
    pub is_read: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnreadCount {
    pub unread: i64,
}

/// `/api/public/contact`: contact details from settings plus active FAQ.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactPage {
    pub settings: std::collections::BTreeMap<String, String>,
    pub faqs: Vec<Faq>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateContactMessageDto {
        CreateContactMessageDto {
            name: "Parent".to_string(),
            email: "parent@example.com".to_string(),
            phone: None,
            subject: "Enrollment".to_string(),
            message: "When is the entrance exam?".to_string(),
        }
    }

    #[test]
    fn test_contact_message_validation() {
        assert!(dto().validate().is_ok());

        let bad_email = CreateContactMessageDto {
            email: "parent".to_string(),
            ..dto()
        };
        assert!(bad_email.validate().is_err());

        let blank_message = CreateContactMessageDto {
            message: "  ".to_string(),
            ..dto()
        };
        assert!(blank_message.validate().is_err());

        let with_phone = CreateContactMessageDto {
            phone: Some("02-123-4567".to_string()),
            ..dto()
        };
        assert!(with_phone.validate().is_ok());
    }
}
