use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{enrollment_form, submit_application, validate_step};

pub fn init_enrollment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(enrollment_form))
        .route("/steps/{step}", post(validate_step))
}

/// Mounted separately so the form limiter applies to submissions only.
pub fn init_enrollment_submit_router() -> Router<AppState> {
    Router::new().route("/submit", post(submit_application))
}
