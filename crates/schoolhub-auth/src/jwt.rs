//! Creation and verification of admin session tokens (HS256).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use schoolhub_config::JwtConfig;
use schoolhub_core::AppError;

use crate::claims::{AdminRole, Claims};

/// Signs a session token for an admin that just authenticated.
///
/// # Errors
///
/// Fails only if encoding fails, which in practice means a broken secret.
pub fn create_access_token(
    admin_id: Uuid,
    email: &str,
    role: AdminRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry).max(0) as usize;
    let now = now as usize;

    let claims = Claims {
        sub: admin_id.to_string(),
        email: email.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Checks signature and expiry and returns the claims.
///
/// # Errors
///
/// 401 for any invalid, tampered or expired token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiry: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: expiry,
        }
    }

    #[test]
    fn test_create_and_verify() {
        let cfg = config("test-secret", 3600);
        let id = Uuid::new_v4();

        let token = create_access_token(id, "admin@school.ac.th", AdminRole::Editor, &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "admin@school.ac.th");
        assert_eq!(claims.role, AdminRole::Editor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_access_token(
            Uuid::new_v4(),
            "a@b.com",
            AdminRole::SuperAdmin,
            &config("secret-a", 3600),
        )
        .unwrap();

        let err = verify_token(&token, &config("secret-b", 3600)).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // default validation allows 60s leeway
        let token = create_access_token(
            Uuid::new_v4(),
            "a@b.com",
            AdminRole::Editor,
            &config("secret", -120),
        )
        .unwrap();

        assert!(verify_token(&token, &config("secret", 3600)).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not.a.jwt", &config("secret", 3600)).is_err());
    }
}
