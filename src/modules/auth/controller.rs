use axum::{Json, extract::State};
use tracing::instrument;

use schoolhub_core::AppError;

use crate::middleware::auth::AdminUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AdminAccount, LoginRequest, LoginResponse};
use super::service::AuthService;

/// Exchange admin credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/admin/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account disabled"),
        (status = 422, description = "Validation error"),
        (status = 429, description = "Too many attempts")
    ),
    tag = "Admin Auth"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Current admin account
#[utoipa::path(
    get,
    path = "/api/admin/auth/me",
    responses(
        (status = 200, description = "Current admin", body = AdminAccount),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admin Auth",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<AdminAccount>, AppError> {
    let account = AuthService::get_admin(&state.db, admin.admin_id()?).await?;
    Ok(Json(account))
}
