use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;

use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::JsonBody;

use super::model::{
    EnrollmentDraft, EnrollmentForm, EnrollmentStep, EnrollmentSubmitted, StepResult,
};
use super::service::EnrollmentService;

#[utoipa::path(
    get,
    path = "/api/public/enrollment",
    responses((status = 200, description = "Wizard steps and program choices", body = EnrollmentForm)),
    tag = "Enrollment"
)]
#[instrument(skip(state))]
pub async fn enrollment_form(
    State(state): State<AppState>,
) -> Result<Json<EnrollmentForm>, AppError> {
    Ok(Json(EnrollmentService::form(&state.db).await?))
}

/// Validates the section of `step` and names the step to show next
#[utoipa::path(
    post,
    path = "/api/public/enrollment/steps/{step}",
    params(("step" = String, Path, description = "Step name (student, parent, academic, review) or number 1-4")),
    request_body = EnrollmentDraft,
    responses(
        (status = 200, description = "Step is valid", body = StepResult),
        (status = 400, description = "Unknown step or malformed body"),
        (status = 422, description = "Field errors keyed by section.field")
    ),
    tag = "Enrollment"
)]
#[instrument(skip(draft))]
pub async fn validate_step(
    Path(step): Path<String>,
    JsonBody(draft): JsonBody<EnrollmentDraft>,
) -> Result<Json<StepResult>, AppError> {
    let step = step
        .parse::<EnrollmentStep>()
        .map_err(|e| AppError::bad_request(anyhow::anyhow!(e)))?;

    let next = draft.advance(step).map_err(AppError::from_fields)?;
    Ok(Json(StepResult::new(step, next)))
}

#[utoipa::path(
    post,
    path = "/api/public/enrollment/submit",
    request_body = EnrollmentDraft,
    responses(
        (status = 201, description = "Application stored", body = EnrollmentSubmitted),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Field errors keyed by section.field"),
        (status = 429, description = "Too many submissions")
    ),
    tag = "Enrollment"
)]
#[instrument(skip(state, draft))]
pub async fn submit_application(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<EnrollmentDraft>,
) -> Result<(StatusCode, Json<EnrollmentSubmitted>), AppError> {
    let application = draft.into_application().map_err(AppError::from_fields)?;
    let admission = EnrollmentService::submit(&state.db, application).await?;

    let response = EnrollmentSubmitted {
        reference_number: admission.reference_number.clone(),
        status: admission.status,
        submitted_at: admission.created_at,
    };

    if state.email_config.notifications_enabled() {
        let email = EmailService::new(state.email_config.clone());
        tokio::spawn(async move { email.notify_new_application(&admission).await });
    }

    Ok((StatusCode::CREATED, Json(response)))
}
