//! Stored enrollment applications and their review workflow.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::serde::{deserialize_optional_parsed, deserialize_optional_string};
use schoolhub_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Review state of an application.
///
/// ```text
/// pending ──► reviewing
///    │            │
///    ├────────────┴──► approved
///    └────────────┴──► rejected
/// ```
///
/// `approved` and `rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl AdmissionStatus {
    pub const ALL: [AdmissionStatus; 4] = [
        AdmissionStatus::Pending,
        AdmissionStatus::Reviewing,
        AdmissionStatus::Approved,
        AdmissionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::Pending => "pending",
            AdmissionStatus::Reviewing => "reviewing",
            AdmissionStatus::Approved => "approved",
            AdmissionStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdmissionStatus::Pending => "Pending",
            AdmissionStatus::Reviewing => "Under review",
            AdmissionStatus::Approved => "Approved",
            AdmissionStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AdmissionStatus::Approved | AdmissionStatus::Rejected)
    }

    pub fn can_transition_to(&self, next: AdmissionStatus) -> bool {
        use AdmissionStatus::*;
        matches!(
            (self, next),
            (Pending, Reviewing) | (Pending | Reviewing, Approved | Rejected)
        )
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown admission status: {}", s))
    }
}

impl TryFrom<String> for AdmissionStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admission {
    pub id: Uuid,
    pub reference_number: String,
    pub student_prefix: String,
    pub student_first_name: String,
    pub student_last_name: String,
    pub student_id_card: String,
    pub student_birth_date: NaiveDate,
    pub student_gender: String,
    pub student_phone: String,
    pub student_address: String,
    pub parent_name: String,
    pub parent_relationship: String,
    pub parent_phone: String,
    pub parent_email: String,
    pub parent_occupation: Option<String>,
    pub previous_school: String,
    pub previous_grade: String,
    pub gpa: f64,
    pub applying_grade: String,
    pub program_id: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub status: AdmissionStatus,
    pub notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admission {
    pub fn student_full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.student_prefix, self.student_first_name, self.student_last_name
        )
    }
}

pub const ADMISSION_COLUMNS: &str = "id, reference_number, student_prefix, student_first_name, \
    student_last_name, student_id_card, student_birth_date, student_gender, student_phone, \
    student_address, parent_name, parent_relationship, parent_phone, parent_email, \
    parent_occupation, previous_school, previous_grade, gpa, applying_grade, program_id, \
    status, notes, reviewed_at, created_at, updated_at";

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdmissionFilterParams {
    /// Matches student name, phone or reference number
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    /// Empty means every status
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    #[param(value_type = Option<AdmissionStatus>)]
    pub status: Option<AdmissionStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAdmissionsResponse {
    pub data: Vec<Admission>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAdmissionStatusDto {
    pub status: AdmissionStatus,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Counts per status for the tab badges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdmissionSummary {
    pub pending: i64,
    pub reviewing: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}

impl AdmissionSummary {
    /// Builds the summary from `(status, count)` rows.
    pub fn from_counts(rows: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut summary = Self::default();
        for (status, count) in rows {
            match status.parse::<AdmissionStatus>() {
                Ok(AdmissionStatus::Pending) => summary.pending += count,
                Ok(AdmissionStatus::Reviewing) => summary.reviewing += count,
                Ok(AdmissionStatus::Approved) => summary.approved += count,
                Ok(AdmissionStatus::Rejected) => summary.rejected += count,
                Err(_) => {
                    tracing::warn!(status = %status, "Ignoring unknown admission status");
                    continue;
                }
            }
            summary.total += count;
        }
        summary
    }
}

/// Returned to the applicant after submitting.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentSubmitted {
    pub reference_number: String,
    pub status: AdmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use AdmissionStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(Pending.can_transition_to(Reviewing));
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Reviewing.can_transition_to(Approved));
        assert!(Reviewing.can_transition_to(Rejected));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!Reviewing.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
        for terminal in [Approved, Rejected] {
            assert!(terminal.is_terminal());
            for next in AdmissionStatus::ALL {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("reviewing".parse::<AdmissionStatus>(), Ok(Reviewing));
        assert!("archived".parse::<AdmissionStatus>().is_err());
        assert_eq!(AdmissionStatus::try_from("approved".to_string()), Ok(Approved));
    }

    #[test]
    fn test_summary_from_counts() {
        let summary = AdmissionSummary::from_counts(vec![
            ("pending".to_string(), 4),
            ("approved".to_string(), 2),
            ("rejected".to_string(), 1),
        ]);
        assert_eq!(
            summary,
            AdmissionSummary {
                pending: 4,
                reviewing: 0,
                approved: 2,
                rejected: 1,
                total: 7,
            }
        );
    }

    #[test]
    fn test_notes_length() {
        let dto = UpdateAdmissionStatusDto {
            status: Approved,
            notes: Some("x".repeat(2001)),
        };
        assert!(dto.validate().is_err());
    }
}
