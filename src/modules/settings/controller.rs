use axum::{Json, extract::State};
use tracing::instrument;

use schoolhub_core::AppError;

use crate::middleware::auth::{AdminUser, RequireSettingsManager};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{SettingsResponse, UpdateSettingsDto};
use super::service::SettingsService;

#[utoipa::path(
    get,
    path = "/api/public/settings",
    responses((status = 200, description = "Site settings, raw and typed", body = SettingsResponse)),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn get_public_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    Ok(Json(SettingsService::get_response(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/settings",
    responses(
        (status = 200, description = "Site settings", body = SettingsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<SettingsResponse>, AppError> {
    Ok(Json(SettingsService::get_response(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings",
    request_body = UpdateSettingsDto,
    responses(
        (status = 200, description = "Settings saved", body = SettingsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only super admins can change settings"),
        (status = 422, description = "Invalid key, value or social link")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(admin = %admin.email()))]
pub async fn update_settings(
    State(state): State<AppState>,
    RequireSettingsManager(admin): RequireSettingsManager,
    ValidatedJson(dto): ValidatedJson<UpdateSettingsDto>,
) -> Result<Json<SettingsResponse>, AppError> {
    Ok(Json(SettingsService::update(&state.db, dto).await?))
}
