//! School calendar events.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::resource::{FieldSet, Resource, ResourceInput, urls};
use crate::validation::{validate_image_url, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Free text such as "08:30 - 15:30"
    pub time_text: Option<String>,
    pub location: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub order_position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    "activity".to_string()
}

fn check_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new("date_range")
            .with_message("End date must not be before the event date".into())),
        _ => Ok(()),
    }
}

fn validate_create_dates(dto: &CreateEventDto) -> Result<(), ValidationError> {
    check_date_range(Some(dto.event_date), dto.end_date)
}

fn validate_update_dates(dto: &UpdateEventDto) -> Result<(), ValidationError> {
    check_date_range(dto.event_date, dto.end_date)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateEventDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(length(max = 100))]
    pub time_text: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

impl ResourceInput for CreateEventDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set("title", self.title.trim().to_string())
            .set_nullable_text("description", self.description)
            .set("event_date", self.event_date)
            .set_some("end_date", self.end_date)
            .set_nullable_text("time_text", self.time_text)
            .set_nullable_text("location", self.location)
            .set("category", self.category)
            .set_nullable_text("image_url", self.image_url)
            .set("is_published", self.is_published.unwrap_or(true));
        fields
    }
}

/// Only the date pair sent in the same request is cross-checked; a new end
/// date is not compared against the stored start date.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateEventDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Clears the end date when true
    #[serde(default)]
    pub clear_end_date: bool,
    #[validate(length(max = 100))]
    pub time_text: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
    #[validate(range(min = 1))]
    pub order_position: Option<i32>,
}

impl ResourceInput for UpdateEventDto {
    fn into_fields(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields
            .set_some("title", self.title.map(|t| t.trim().to_string()))
            .set_nullable_text("description", self.description)
            .set_some("event_date", self.event_date)
            .set_some("end_date", self.end_date)
            .set_nullable_text("time_text", self.time_text)
            .set_nullable_text("location", self.location)
            .set_some("category", self.category)
            .set_nullable_text("image_url", self.image_url)
            .set_some("is_published", self.is_published)
            .set_some("order_position", self.order_position);
        if self.clear_end_date {
            fields.set("end_date", None::<NaiveDate>);
        }
        fields
    }
}

impl Resource for Event {
    type Row = Event;
    type Create = CreateEventDto;
    type Update = UpdateEventDto;

    const TABLE: &'static str = "events";
    const NAME: &'static str = "Event";
    const SLUG: &'static str = "events";
    const COLUMNS: &'static str = "id, title, description, event_date, end_date, time_text, \
        location, category, image_url, is_published, order_position, created_at, updated_at";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ADMIN_ORDER: &'static str = "event_date ASC, order_position ASC";

    fn image_urls(row: &Event) -> Vec<String> {
        urls([&row.image_url])
    }
}

/// `/api/public/calendar?year=2025&month=6`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    #[validate(range(min = 2000, max = 2200, message = "Year must be between 2000 and 2200"))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: u32,
}

impl CalendarQuery {
    /// First day of the month and first day of the following month.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let end = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some((start, end))
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpcomingQuery {
    /// Number of events to return (1-50, default 6)
    pub limit: Option<i64>,
}

impl UpcomingQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(6).clamp(1, 50)
    }
}
