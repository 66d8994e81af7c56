use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub use schoolhub_models::admissions::{Admission, EnrollmentSubmitted};
pub use schoolhub_models::enrollment::*;

/// Program choice offered on the academic step.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProgramOption {
    pub id: Uuid,
    pub name: String,
    pub grade_levels: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StepInfo {
    pub step: EnrollmentStep,
    pub number: u8,
}

/// `GET /api/public/enrollment`: what the wizard needs to render.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentForm {
    pub steps: Vec<StepInfo>,
    pub grades: Vec<GradeLevel>,
    pub programs: Vec<ProgramOption>,
}
