use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use schoolhub_auth::create_access_token;
use schoolhub_config::JwtConfig;
use schoolhub_core::{AppError, verify_password};

use crate::metrics::{track_admin_login_failure, track_admin_login_success, track_jwt_issued};

use super::model::{ADMIN_USER_COLUMNS, AdminAccount, AdminCredentials, LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = dto.email.trim().to_lowercase();

        let Some(credentials) = sqlx::query_as::<_, AdminCredentials>(
            "SELECT id, email, password_hash, role, is_active FROM admin_users WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(db)
        .await?
        else {
            track_admin_login_failure("unknown_email");
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            track_admin_login_failure("bad_password");
            warn!(admin_id = %credentials.id, "Failed login attempt");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        if !credentials.is_active {
            track_admin_login_failure("inactive");
            return Err(AppError::forbidden("Admin account is disabled"));
        }

        let admin = sqlx::query_as::<_, AdminAccount>(&format!(
            "UPDATE admin_users SET last_login_at = NOW() WHERE id = $1 RETURNING {}",
            ADMIN_USER_COLUMNS
        ))
        .bind(credentials.id)
        .fetch_one(db)
        .await?;

        let access_token =
            create_access_token(admin.id, &admin.email, admin.role, jwt_config)?;

        track_jwt_issued();
        track_admin_login_success(admin.role.as_str());
        info!(admin_id = %admin.id, "Admin logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer",
            expires_in: jwt_config.access_token_expiry,
            admin,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_admin(db: &PgPool, admin_id: Uuid) -> Result<AdminAccount, AppError> {
        sqlx::query_as::<_, AdminAccount>(&format!(
            "SELECT {} FROM admin_users WHERE id = $1",
            ADMIN_USER_COLUMNS
        ))
        .bind(admin_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Admin not found")))
    }
}
