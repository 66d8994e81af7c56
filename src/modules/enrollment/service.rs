use chrono::{Datelike, Utc};
use sqlx::PgPool;
use tracing::{info, instrument};

use schoolhub_core::AppError;

use crate::metrics::track_application_submitted;
use crate::modules::admissions::model::ADMISSION_COLUMNS;
use crate::utils::sql::write_error;

use super::model::{
    Admission, EnrollmentApplication, EnrollmentForm, EnrollmentStep, GradeLevel, ProgramOption,
    StepInfo, format_reference_number,
};

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db))]
    pub async fn form(db: &PgPool) -> Result<EnrollmentForm, AppError> {
        let programs = sqlx::query_as::<_, ProgramOption>(
            "SELECT id, name, grade_levels FROM curriculum_programs
             WHERE is_active = TRUE ORDER BY order_position ASC",
        )
        .fetch_all(db)
        .await?;

        Ok(EnrollmentForm {
            steps: EnrollmentStep::ALL
                .into_iter()
                .map(|step| StepInfo {
                    step,
                    number: step.number(),
                })
                .collect(),
            grades: vec![GradeLevel::M1, GradeLevel::M4],
            programs,
        })
    }

    /// Stores a validated application as `pending` under the next reference
    /// number of the current year.
    #[instrument(skip_all, fields(grade = application.academic.applying_grade.as_str()))]
    pub async fn submit(
        db: &PgPool,
        application: EnrollmentApplication,
    ) -> Result<Admission, AppError> {
        let EnrollmentApplication {
            student,
            parent,
            academic,
        } = application;

        let year = Utc::now().year();
        let mut tx = db.begin().await?;

        let sequence = sqlx::query_scalar::<_, i64>(
            "INSERT INTO admission_counters (year, last_value) VALUES ($1, 1)
             ON CONFLICT (year) DO UPDATE SET last_value = admission_counters.last_value + 1
             RETURNING last_value",
        )
        .bind(year)
        .fetch_one(&mut *tx)
        .await?;

        let reference_number = format_reference_number(year, sequence);

        let admission = sqlx::query_as::<_, Admission>(&format!(
            r#"INSERT INTO admissions (
                reference_number, student_prefix, student_first_name, student_last_name,
                student_id_card, student_birth_date, student_gender, student_phone,
                student_address, parent_name, parent_relationship, parent_phone, parent_email,
                parent_occupation, previous_school, previous_grade, gpa, applying_grade,
                program_id
               )
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                       $17, $18, $19)
               RETURNING {}"#,
            ADMISSION_COLUMNS
        ))
        .bind(&reference_number)
        .bind(student.prefix.trim())
        .bind(student.first_name.trim())
        .bind(student.last_name.trim())
        .bind(&student.id_card)
        .bind(student.birth_date)
        .bind(student.gender.as_str())
        .bind(digits(&student.phone))
        .bind(student.address.trim())
        .bind(parent.full_name.trim())
        .bind(parent.relationship.trim())
        .bind(digits(&parent.phone))
        .bind(parent.email.trim().to_lowercase())
        .bind(
            parent
                .occupation
                .as_deref()
                .map(str::trim)
                .filter(|o| !o.is_empty()),
        )
        .bind(academic.previous_school.trim())
        .bind(academic.previous_grade.trim())
        .bind(academic.gpa)
        .bind(academic.applying_grade.as_str())
        .bind(academic.program_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error(e, "Application"))?;

        tx.commit().await?;

        track_application_submitted(academic.applying_grade.as_str());
        info!(reference_number = %admission.reference_number, "Application submitted");

        Ok(admission)
    }
}
