//! Online enrollment wizard.
//!
//! The applicant fills four sections in order:
//!
//! | # | Step | Section |
//! |---|------|---------|
//! | 1 | `student` | [`StudentInfo`] |
//! | 2 | `parent` | [`ParentInfo`] |
//! | 3 | `academic` | [`AcademicInfo`] |
//! | 4 | `review` | [`Agreements`] |
//!
//! The client posts the draft it has so far together with the current step;
//! only that step's section is validated. Errors are keyed by the section
//! name (`student.id_card`) so the form can highlight the field. Submitting
//! validates every section again and yields an [`EnrollmentApplication`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use schoolhub_core::FieldErrors;
use schoolhub_core::errors::collect_field_errors;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{
    validate_national_id, validate_not_blank, validate_not_future, validate_phone,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStep {
    Student,
    Parent,
    Academic,
    Review,
}

impl EnrollmentStep {
    pub const ALL: [EnrollmentStep; 4] = [
        EnrollmentStep::Student,
        EnrollmentStep::Parent,
        EnrollmentStep::Academic,
        EnrollmentStep::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStep::Student => "student",
            EnrollmentStep::Parent => "parent",
            EnrollmentStep::Academic => "academic",
            EnrollmentStep::Review => "review",
        }
    }

    /// 1-based position shown in the progress bar.
    pub fn number(&self) -> u8 {
        match self {
            EnrollmentStep::Student => 1,
            EnrollmentStep::Parent => 2,
            EnrollmentStep::Academic => 3,
            EnrollmentStep::Review => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

impl fmt::Display for EnrollmentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the step name or its number (`student` or `1`).
impl FromStr for EnrollmentStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(number) = s.parse::<u8>() {
            return Self::from_number(number).ok_or_else(|| format!("Unknown step: {}", s));
        }
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| format!("Unknown step: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Grade the applicant enters: first year of lower or upper secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    M1,
    M4,
}

impl GradeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLevel::M1 => "m1",
            GradeLevel::M4 => "m4",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct StudentInfo {
    /// Title such as "Mr.", "Miss", "Master"
    #[validate(length(min = 1, max = 20, message = "Prefix is required"))]
    pub prefix: String,
    #[validate(
        length(min = 1, max = 100, message = "First name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 100, message = "Last name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub last_name: String,
    #[validate(custom(function = "validate_national_id"))]
    pub id_card: String,
    #[validate(custom(function = "validate_not_future"))]
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(
        length(min = 1, max = 500, message = "Address must be 1-500 characters"),
        custom(function = "validate_not_blank")
    )]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParentInfo {
    #[validate(
        length(min = 1, max = 150, message = "Full name must be 1-150 characters"),
        custom(function = "validate_not_blank")
    )]
    pub full_name: String,
    #[validate(length(min = 1, max = 50, message = "Relationship is required"))]
    pub relationship: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 100))]
    pub occupation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AcademicInfo {
    #[validate(
        length(min = 1, max = 200, message = "Previous school is required"),
        custom(function = "validate_not_blank")
    )]
    pub previous_school: String,
    #[validate(length(min = 1, max = 50, message = "Previous grade is required"))]
    pub previous_grade: String,
    #[validate(range(min = 0.0, max = 4.0, message = "GPA must be between 0.00 and 4.00"))]
    pub gpa: f64,
    pub applying_grade: GradeLevel,
    pub program_id: Option<Uuid>,
}

fn must_be_true(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(ValidationError::new("must_accept").with_message("Must be accepted".into()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct Agreements {
    #[validate(custom(function = "must_be_true"))]
    pub accept_terms: bool,
    #[validate(custom(function = "must_be_true"))]
    pub confirm_information: bool,
}

/// Everything the applicant has entered so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentDraft {
    pub student: Option<StudentInfo>,
    pub parent: Option<ParentInfo>,
    pub academic: Option<AcademicInfo>,
    pub agreements: Option<Agreements>,
}

fn section_errors<T: Validate>(section: &str, value: Option<&T>) -> FieldErrors {
    let Some(value) = value else {
        let mut errors = FieldErrors::new();
        errors.insert(
            section.to_string(),
            vec![format!("{} information is required", section)],
        );
        return errors;
    };

    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errs) => collect_field_errors(&errs)
            .into_iter()
            .map(|(field, messages)| (format!("{}.{}", section, field), messages))
            .collect(),
    }
}

impl EnrollmentDraft {
    /// Validates the section belonging to `step` only.
    pub fn validate_step(&self, step: EnrollmentStep) -> Result<(), FieldErrors> {
        let errors = match step {
            EnrollmentStep::Student => section_errors("student", self.student.as_ref()),
            EnrollmentStep::Parent => section_errors("parent", self.parent.as_ref()),
            EnrollmentStep::Academic => section_errors("academic", self.academic.as_ref()),
            EnrollmentStep::Review => section_errors("agreements", self.agreements.as_ref()),
        };

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Moves past `step` when its section is valid. `Ok(None)` after the
    /// review step means the draft is ready to submit.
    pub fn advance(&self, step: EnrollmentStep) -> Result<Option<EnrollmentStep>, FieldErrors> {
        self.validate_step(step)?;
        Ok(step.next())
    }

    /// Validates every section and returns the complete application.
    pub fn into_application(self) -> Result<EnrollmentApplication, FieldErrors> {
        let mut errors = FieldErrors::new();
        for step in EnrollmentStep::ALL {
            if let Err(step_errors) = self.validate_step(step) {
                errors.extend(step_errors);
            }
        }

        match (self.student, self.parent, self.academic, self.agreements) {
            (Some(student), Some(parent), Some(academic), Some(_)) if errors.is_empty() => {
                Ok(EnrollmentApplication {
                    student,
                    parent,
                    academic,
                })
            }
            _ => Err(errors),
        }
    }
}

/// A fully validated application, ready to be stored.
#[derive(Debug, Clone)]
pub struct EnrollmentApplication {
    pub student: StudentInfo,
    pub parent: ParentInfo,
    pub academic: AcademicInfo,
}

/// `POST /api/public/enrollment/steps/{step}`
#[derive(Debug, Serialize, ToSchema)]
pub struct StepResult {
    pub step: EnrollmentStep,
    pub step_number: u8,
    /// `None` once the review step passes
    pub next_step: Option<EnrollmentStep>,
    pub ready_to_submit: bool,
}

impl StepResult {
    pub fn new(step: EnrollmentStep, next_step: Option<EnrollmentStep>) -> Self {
        Self {
            step,
            step_number: step.number(),
            next_step,
            ready_to_submit: next_step.is_none(),
        }
    }
}

/// `ADM-2025-00042`
pub fn format_reference_number(year: i32, sequence: i64) -> String {
    format!("ADM-{}-{:05}", year, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn student() -> StudentInfo {
        StudentInfo {
            prefix: "Miss".to_string(),
            first_name: "Malee".to_string(),
            last_name: "Sukjai".to_string(),
            id_card: "1103700012345".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2012, 5, 20).unwrap(),
            gender: Gender::Female,
            phone: "0812345678".to_string(),
            address: "99 Moo 1, Bangkok".to_string(),
        }
    }

    fn parent() -> ParentInfo {
        ParentInfo {
            full_name: "Somsri Sukjai".to_string(),
            relationship: "mother".to_string(),
            phone: "0898765432".to_string(),
            email: "somsri@example.com".to_string(),
            occupation: None,
        }
    }

    fn academic() -> AcademicInfo {
        AcademicInfo {
            previous_school: "Wat Primary School".to_string(),
            previous_grade: "P.6".to_string(),
            gpa: 3.75,
            applying_grade: GradeLevel::M1,
            program_id: None,
        }
    }

    fn complete_draft() -> EnrollmentDraft {
        EnrollmentDraft {
            student: Some(student()),
            parent: Some(parent()),
            academic: Some(academic()),
            agreements: Some(Agreements {
                accept_terms: true,
                confirm_information: true,
            }),
        }
    }

    #[test]
    fn test_step_order() {
        assert_eq!(EnrollmentStep::Student.next(), Some(EnrollmentStep::Parent));
        assert_eq!(EnrollmentStep::Academic.next(), Some(EnrollmentStep::Review));
        assert_eq!(EnrollmentStep::Review.next(), None);
        assert_eq!(EnrollmentStep::Student.previous(), None);
        assert_eq!(EnrollmentStep::Review.previous(), Some(EnrollmentStep::Academic));
    }

    #[test]
    fn test_step_parse() {
        assert_eq!("parent".parse::<EnrollmentStep>(), Ok(EnrollmentStep::Parent));
        assert_eq!("3".parse::<EnrollmentStep>(), Ok(EnrollmentStep::Academic));
        assert!("5".parse::<EnrollmentStep>().is_err());
        assert!("payment".parse::<EnrollmentStep>().is_err());
    }

    #[test]
    fn test_twelve_digit_id_blocks_step_one() {
        let mut s = student();
        s.id_card = "110370001234".to_string();
        let draft = EnrollmentDraft {
            student: Some(s),
            ..Default::default()
        };

        let errors = draft.advance(EnrollmentStep::Student).unwrap_err();
        assert!(errors.contains_key("student.id_card"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_valid_student_advances_to_parent() {
        let draft = EnrollmentDraft {
            student: Some(student()),
            ..Default::default()
        };
        assert_eq!(
            draft.advance(EnrollmentStep::Student),
            Ok(Some(EnrollmentStep::Parent))
        );
    }

    #[test]
    fn test_step_validates_only_its_section() {
        let mut p = parent();
        p.email = "not-an-email".to_string();
        let draft = EnrollmentDraft {
            student: Some(student()),
            parent: Some(p),
            ..Default::default()
        };

        assert!(draft.validate_step(EnrollmentStep::Student).is_ok());
        let errors = draft.validate_step(EnrollmentStep::Parent).unwrap_err();
        assert!(errors.contains_key("parent.email"));
    }

    #[test]
    fn test_missing_section_is_reported() {
        let errors = EnrollmentDraft::default()
            .validate_step(EnrollmentStep::Academic)
            .unwrap_err();
        assert!(errors.contains_key("academic"));
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let mut s = student();
        s.birth_date = Utc::now().date_naive() + Duration::days(2);
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_gpa_bounds() {
        let mut a = academic();
        a.gpa = 4.01;
        assert!(a.validate().is_err());
        a.gpa = 0.0;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_review_requires_both_agreements() {
        let mut draft = complete_draft();
        draft.agreements = Some(Agreements {
            accept_terms: true,
            confirm_information: false,
        });
        let errors = draft.advance(EnrollmentStep::Review).unwrap_err();
        assert!(errors.contains_key("agreements.confirm_information"));

        assert_eq!(complete_draft().advance(EnrollmentStep::Review), Ok(None));
    }

    #[test]
    fn test_into_application_collects_all_errors() {
        let mut draft = complete_draft();
        draft.student.as_mut().unwrap().phone = "123".to_string();
        draft.parent = None;

        let errors = draft.into_application().unwrap_err();
        assert!(errors.contains_key("student.phone"));
        assert!(errors.contains_key("parent"));
    }

    #[test]
    fn test_into_application_success() {
        let application = complete_draft().into_application().unwrap();
        assert_eq!(application.student.first_name, "Malee");
        assert_eq!(application.academic.applying_grade, GradeLevel::M1);
    }

    #[test]
    fn test_grade_level_serialization() {
        assert_eq!(serde_json::to_string(&GradeLevel::M4).unwrap(), r#""m4""#);
        assert!(serde_json::from_str::<GradeLevel>(r#""m2""#).is_err());
    }

    #[test]
    fn test_reference_number_format() {
        assert_eq!(format_reference_number(2025, 42), "ADM-2025-00042");
        assert_eq!(format_reference_number(2026, 1), "ADM-2026-00001");
    }
}
