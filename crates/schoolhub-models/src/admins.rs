//! Admin accounts and login.

use chrono::{DateTime, Utc};
use schoolhub_auth::AdminRole;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Admin account as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    #[sqlx(try_from = "String")]
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const ADMIN_USER_COLUMNS: &str =
    "id, email, full_name, role, is_active, last_login_at, created_at, updated_at";

/// Admin row including the password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct AdminCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: AdminRole,
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub admin: AdminUser,
}

/// Used by the CLI when creating accounts.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 150))]
    pub full_name: String,
    pub role: AdminRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "office@school.ac.th".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "office".to_string(),
            password: "".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_create_admin_requires_long_password() {
        let dto = CreateAdminDto {
            email: "admin@school.ac.th".to_string(),
            password: "short".to_string(),
            full_name: "Admin".to_string(),
            role: AdminRole::SuperAdmin,
        };
        assert!(dto.validate().is_err());
    }
}
