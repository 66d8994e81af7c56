//! Admin accounts can only be created here, never through the API.

use schoolhub_auth::AdminRole;
use schoolhub_core::hash_password;
use schoolhub_models::admins::CreateAdminDto;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub async fn create_admin(
    db: &PgPool,
    dto: CreateAdminDto,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    dto.validate()?;

    let email = dto.email.trim().to_lowercase();
    let password_hash =
        hash_password(&dto.password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO admin_users (email, password_hash, full_name, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(dto.full_name.trim())
    .bind(dto.role.as_str())
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| format!("An admin with email {} already exists", email).into())
}

/// Deactivates an account; its tokens stop working on the next request.
pub async fn deactivate_admin(db: &PgPool, email: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let affected = sqlx::query(
        "UPDATE admin_users SET is_active = FALSE, updated_at = NOW() WHERE email = $1",
    )
    .bind(email.trim().to_lowercase())
    .execute(db)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

pub fn parse_role(value: &str) -> Result<AdminRole, String> {
    value.trim().replace('-', "_").parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_accepts_dashes() {
        assert_eq!(parse_role("super-admin"), Ok(AdminRole::SuperAdmin));
        assert_eq!(parse_role("editor"), Ok(AdminRole::Editor));
        assert!(parse_role("owner").is_err());
    }
}
