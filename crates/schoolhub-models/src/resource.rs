//! Descriptors for content tables managed through the generic CRUD panel.
//!
//! Every content entity (news, staff, FAQ, albums, ...) is a flat row with an
//! `order_position`, a visibility flag and timestamps. Instead of one
//! hand-written service per table, each entity implements [`Resource`] and
//! the API drives list / create / update / toggle / delete generically.
//!
//! Inputs describe what they write as a [`FieldSet`]: an ordered list of
//! `(column, value)` pairs. Column names always come from code, never from
//! request data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::FromRow;
use sqlx::postgres::PgRow;
use utoipa::ToSchema;
use validator::Validate;

/// A typed value bound into an INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    TextList(Vec<String>),
    Int(Option<i32>),
    Bool(bool),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(Some(value))
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::TextList(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(Some(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(Some(value))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        FieldValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(Some(value))
    }
}

/// Ordered `(column, value)` pairs written by one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<(&'static str, FieldValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column, replacing an earlier value for the same column.
    pub fn set(&mut self, column: &'static str, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    /// Sets a column only when a value was supplied (PATCH semantics).
    pub fn set_some<T: Into<FieldValue>>(
        &mut self,
        column: &'static str,
        value: Option<T>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    /// Text column that may be cleared: `None` leaves it untouched, a blank
    /// string stores NULL, anything else is stored trimmed.
    pub fn set_nullable_text(&mut self, column: &'static str, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                self.set(column, FieldValue::Text(None));
            } else {
                self.set(column, trimmed.to_string());
            }
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(c, _)| *c)
    }
}

impl IntoIterator for FieldSet {
    type Item = (&'static str, FieldValue);
    type IntoIter = std::vec::IntoIter<(&'static str, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// A request body that writes columns of a resource table.
pub trait ResourceInput: DeserializeOwned + Validate + Send + 'static {
    fn into_fields(self) -> FieldSet;
}

/// Child rows removed together with their parent, inside the same
/// transaction, e.g. the photos of an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildTable {
    pub table: &'static str,
    pub foreign_key: &'static str,
    /// Column holding an uploaded object to clean up after commit.
    pub image_column: Option<&'static str>,
}

/// Descriptor of one content table.
pub trait Resource: Send + Sync + 'static {
    type Row: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static;
    type Create: ResourceInput;
    type Update: ResourceInput;

    /// Table name.
    const TABLE: &'static str;
    /// Human name used in messages ("FAQ item not found").
    const NAME: &'static str;
    /// URL segment and dashboard tab.
    const SLUG: &'static str;
    /// SELECT / RETURNING column list.
    const COLUMNS: &'static str;
    /// Boolean column gating public visibility.
    const VISIBILITY_COLUMN: &'static str;
    /// ORDER BY clause for admin lists.
    const ADMIN_ORDER: &'static str;
    /// ORDER BY clause for public lists.
    const PUBLIC_ORDER: &'static str = Self::ADMIN_ORDER;
    /// Rows deleted with the parent.
    const CHILDREN: &'static [ChildTable] = &[];
    /// Extra condition a visible row must also meet before it is public,
    /// e.g. a publish date that has passed.
    const PUBLIC_FILTER: Option<&'static str> = None;

    /// Image URLs held by a row, cleaned up from storage on delete.
    fn image_urls(row: &Self::Row) -> Vec<String>;

    /// WHERE condition selecting the rows anonymous visitors may see.
    fn public_predicate() -> String {
        match Self::PUBLIC_FILTER {
            Some(filter) => format!("{} = TRUE AND {}", Self::VISIBILITY_COLUMN, filter),
            None => format!("{} = TRUE", Self::VISIBILITY_COLUMN),
        }
    }
}

/// Body of the visibility toggle endpoint.
#[derive(Debug, Clone, serde::Deserialize, Serialize, Validate, ToSchema)]
pub struct VisibilityDto {
    pub visible: bool,
}

/// Collects the non-empty URLs out of optional image columns.
pub fn urls<'a>(values: impl IntoIterator<Item = &'a Option<String>>) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .filter(|u| !u.trim().is_empty())
        .cloned()
        .collect()
}
