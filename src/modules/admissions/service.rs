use anyhow::anyhow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};
use uuid::Uuid;

use schoolhub_core::{AppError, PaginationMeta};

use crate::metrics::track_admission_status_changed;
use crate::utils::sql::contains_pattern;

use super::model::{
    ADMISSION_COLUMNS, Admission, AdmissionFilterParams, AdmissionStatus, AdmissionSummary,
    PaginatedAdmissionsResponse, UpdateAdmissionStatusDto,
};

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Application not found"))
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &AdmissionFilterParams) {
    builder.push(" WHERE 1 = 1");

    if let Some(search) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        builder.push(" AND (student_first_name || ' ' || student_last_name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR student_phone ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR parent_phone ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR reference_number ILIKE ");
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\')");
    }

    if let Some(status) = filters.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
}

pub struct AdmissionService;

impl AdmissionService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        filters: AdmissionFilterParams,
    ) -> Result<PaginatedAdmissionsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM admissions");
        push_filters(&mut count_query, &filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await?;

        let mut data_query =
            QueryBuilder::new(format!("SELECT {} FROM admissions", ADMISSION_COLUMNS));
        push_filters(&mut data_query, &filters);
        data_query.push(" ORDER BY created_at DESC LIMIT ");
        data_query.push_bind(limit);
        data_query.push(" OFFSET ");
        data_query.push_bind(offset);

        let data = data_query
            .build_query_as::<Admission>()
            .fetch_all(db)
            .await?;

        Ok(PaginatedAdmissionsResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn summary(db: &PgPool) -> Result<AdmissionSummary, AppError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM admissions GROUP BY status",
        )
        .fetch_all(db)
        .await?;

        Ok(AdmissionSummary::from_counts(rows))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Admission, AppError> {
        sqlx::query_as::<_, Admission>(&format!(
            "SELECT {} FROM admissions WHERE id = $1",
            ADMISSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    /// Name of the curriculum program an application refers to, if any.
    pub async fn program_name(
        db: &PgPool,
        program_id: Option<Uuid>,
    ) -> Result<Option<String>, AppError> {
        let Some(program_id) = program_id else {
            return Ok(None);
        };

        Ok(sqlx::query_scalar::<_, String>(
            "SELECT name FROM curriculum_programs WHERE id = $1",
        )
        .bind(program_id)
        .fetch_optional(db)
        .await?)
    }

    /// Moves an application along the review workflow. The row is locked so
    /// two reviewers cannot both move it out of the same state.
    #[instrument(skip(db, dto), fields(status = %dto.status))]
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAdmissionStatusDto,
    ) -> Result<Admission, AppError> {
        let mut tx = db.begin().await?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT status FROM admissions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(not_found)?;

        let current = current
            .parse::<AdmissionStatus>()
            .map_err(AppError::internal_error)?;

        if !current.can_transition_to(dto.status) {
            return Err(AppError::conflict(format!(
                "Cannot change an application from {} to {}",
                current, dto.status
            )));
        }

        let notes = dto
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let admission = sqlx::query_as::<_, Admission>(&format!(
            "UPDATE admissions
             SET status = $1, notes = COALESCE($2, notes), reviewed_at = NOW(), updated_at = NOW()
             WHERE id = $3
             RETURNING {}",
            ADMISSION_COLUMNS
        ))
        .bind(dto.status.as_str())
        .bind(notes)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        track_admission_status_changed(dto.status.as_str());
        info!(
            reference_number = %admission.reference_number,
            from = %current,
            "Application status changed"
        );

        Ok(admission)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM admissions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    pub async fn count_by_status(db: &PgPool, status: AdmissionStatus) -> Result<i64, AppError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admissions WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(db)
                .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::PaginationParams;

    #[test]
    fn test_filters_bind_search_and_status() {
        let filters = AdmissionFilterParams {
            search: Some(" ADM-2025 ".to_string()),
            status: Some(AdmissionStatus::Pending),
            pagination: PaginationParams::default(),
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM admissions");
        push_filters(&mut builder, &filters);

        let sql = builder.sql();
        assert!(sql.contains("reference_number ILIKE $4"));
        assert!(sql.ends_with("AND status = $5"));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filters = AdmissionFilterParams {
            search: Some("   ".to_string()),
            status: None,
            pagination: PaginationParams::default(),
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM admissions");
        push_filters(&mut builder, &filters);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM admissions WHERE 1 = 1");
    }
}
