use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;

use crate::middleware::auth::AdminUser;
use crate::modules::settings::SettingsService;
use crate::state::AppState;
use crate::validator::{QueryParams, ValidatedJson};

use super::model::{
    Admission, AdmissionFilterParams, AdmissionSummary, PaginatedAdmissionsResponse,
    UpdateAdmissionStatusDto,
};
use super::print::render_application;
use super::service::AdmissionService;

#[utoipa::path(
    get,
    path = "/api/admin/admissions",
    params(AdmissionFilterParams),
    responses(
        (status = 200, description = "Applications, newest first", body = PaginatedAdmissionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_admissions(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(filters): QueryParams<AdmissionFilterParams>,
) -> Result<Json<PaginatedAdmissionsResponse>, AppError> {
    Ok(Json(AdmissionService::list(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/admissions/summary",
    responses(
        (status = 200, description = "Counts per status", body = AdmissionSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn admission_summary(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<AdmissionSummary>, AppError> {
    Ok(Json(AdmissionService::summary(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/admissions/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application", body = Admission),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found")
    ),
    tag = "Admissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_admission(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Admission>, AppError> {
    Ok(Json(AdmissionService::get(&state.db, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/admin/admissions/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateAdmissionStatusDto,
    responses(
        (status = 200, description = "Status changed", body = Admission),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Transition not allowed from the current status"),
        (status = 422, description = "Validation error")
    ),
    tag = "Admissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(admin = %admin.email()))]
pub async fn update_admission_status(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAdmissionStatusDto>,
) -> Result<Json<Admission>, AppError> {
    Ok(Json(
        AdmissionService::update_status(&state.db, id, dto).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/admissions/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found")
    ),
    tag = "Admissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_admission(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdmissionService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/admissions/{id}/print",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Printable HTML document", body = String, content_type = "text/html"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found")
    ),
    tag = "Admissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn print_admission(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let admission = AdmissionService::get(&state.db, id).await?;
    let program = AdmissionService::program_name(&state.db, admission.program_id).await?;
    let school_name = SettingsService::get_value(&state.db, "school_name")
        .await?
        .unwrap_or_else(|| "School".to_string());

    Ok(Html(render_application(
        &admission,
        program.as_deref(),
        &school_name,
    )))
}
