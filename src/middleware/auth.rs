use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use schoolhub_auth::{AdminRole, Claims, verify_token};
use schoolhub_core::AppError;
use uuid::Uuid;

use crate::state::AppState;

/// Authenticated admin, taken from the bearer token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl AdminUser {
    pub fn admin_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid admin ID in token"))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> AdminRole {
        self.0.role
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // already verified by `require_admin`
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AdminUser(claims.clone()));
        }

        let claims = verify_token(bearer_token(parts)?, &state.jwt_config)?;
        Ok(AdminUser(claims))
    }
}

/// Route layer for `/api/admin/*`: rejects requests without a valid token or
/// whose account has been deactivated since the token was issued.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let admin = AdminUser::from_request_parts(&mut parts, &state).await?;
    let admin_id = admin.admin_id()?;

    let active = sqlx::query_scalar::<_, bool>("SELECT is_active FROM admin_users WHERE id = $1")
        .bind(admin_id)
        .fetch_optional(&state.db)
        .await?;

    if active != Some(true) {
        tracing::warn!(admin_id = %admin_id, "Token presented for missing or inactive admin");
        return Err(AppError::unauthorized("Admin account is not active"));
    }

    parts.extensions.insert(admin.0);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Declares an extractor that only lets admins with the given role through.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $check:path, $message:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AdminUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = schoolhub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let admin =
                    $crate::middleware::auth::AdminUser::from_request_parts(parts, state).await?;

                if !$check(&admin.role()) {
                    return Err(schoolhub_core::AppError::forbidden($message));
                }

                Ok($name(admin))
            }
        }
    };
}

require_role!(
    RequireSettingsManager,
    AdminRole::can_manage_settings,
    "Only super admins can change site settings"
);
