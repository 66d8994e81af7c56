//! Handlers instantiated per resource by [`super::resource_router`].
//!
//! Generic handlers cannot carry `#[utoipa::path]`; the admin content routes
//! are listed in the API description instead.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use schoolhub_core::AppError;
use schoolhub_models::{Resource, VisibilityDto};

use crate::middleware::auth::AdminUser;
use crate::modules::content::service::ContentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

pub async fn list_items<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<R::Row>>, AppError> {
    let rows = ContentService::list_admin::<R>(&state.db).await?;
    Ok(Json(rows))
}

pub async fn get_item<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<R::Row>, AppError> {
    let row = ContentService::get::<R>(&state.db, id).await?;
    Ok(Json(row))
}

pub async fn create_item<R: Resource>(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<R::Create>,
) -> Result<(StatusCode, Json<R::Row>), AppError> {
    let row = ContentService::create::<R>(&state.db, dto).await?;
    tracing::debug!(admin = %admin.email(), table = R::TABLE, "Content created");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_item<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<R::Update>,
) -> Result<Json<R::Row>, AppError> {
    let row = ContentService::update::<R>(&state.db, id, dto).await?;
    Ok(Json(row))
}

pub async fn set_visibility<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<VisibilityDto>,
) -> Result<Json<R::Row>, AppError> {
    let row = ContentService::set_visibility::<R>(&state.db, id, dto.visible).await?;
    Ok(Json(row))
}

pub async fn delete_item<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ContentService::delete::<R>(&state.db, state.storage.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
