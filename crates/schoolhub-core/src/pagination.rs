//! Pagination utilities for list endpoints.
//!
//! Two styles are accepted on the query string:
//!
//! - offset based: `?limit=20&offset=40`
//! - page based: `?limit=20&page=3`
//!
//! When `page` is present it wins over `offset`. Limits are clamped to
//! `[1, 100]` and default to 10.
//!
//! ```ignore
//! let params = PaginationParams { limit: Some(20), offset: None, page: Some(3) };
//! assert_eq!(params.offset(), 40);
//!
//! let meta = PaginationMeta::new(total, &params);
//! Ok(Json(Paginated { data: rows, meta }))
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query strings send numbers as text and empty inputs as `""`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata returned alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching rows
    pub total: i64,
    /// Limit that was applied
    pub limit: i64,
    /// Rows skipped (offset-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Current page (page-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether another page exists after this one
    pub has_more: bool,
}

impl PaginationMeta {
    /// Builds the metadata for a page given the total row count.
    #[must_use]
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let offset = params.offset();

        Self {
            total,
            limit,
            offset: if params.page().is_some() {
                None
            } else {
                Some(offset)
            },
            page: params.page(),
            has_more: offset + limit < total,
        }
    }
}

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (ignored when `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number, 1-indexed
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    /// Effective limit, clamped to `[1, 100]`.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Effective offset, derived from `page` when one is given.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

/// A page of rows plus its metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        let cases = [(Some(0), 1), (Some(-3), 1), (Some(50), 50), (Some(101), 100)];

        for (input, expected) in cases {
            let params = PaginationParams {
                limit: input,
                offset: None,
                page: None,
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_negative_offset_is_zero() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(-5),
            page: None,
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_overrides_offset() {
        let params = PaginationParams {
            limit: Some(20),
            offset: Some(7),
            page: Some(3),
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.page(), Some(3));
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let params = PaginationParams {
            limit: Some(10),
            offset: None,
            page: Some(0),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), Some(1));
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(0),
            page: None,
        };
        let meta = PaginationMeta::new(25, &params);
        assert!(meta.has_more);
        assert_eq!(meta.offset, Some(0));
        assert_eq!(meta.page, None);

        let last = PaginationParams {
            limit: Some(10),
            offset: None,
            page: Some(3),
        };
        let meta = PaginationMeta::new(25, &last);
        assert!(!meta.has_more);
        assert_eq!(meta.offset, None);
        assert_eq!(meta.page, Some(3));
    }

    #[test]
    fn test_deserialize_from_strings() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"25","offset":"50"}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let params: PaginationParams = serde_json::from_str(r#"{"limit":"","page":""}"#).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_meta_serialization_skips_absent_fields() {
        let meta = PaginationMeta {
            total: 3,
            limit: 10,
            offset: None,
            page: Some(1),
            has_more: false,
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""page":1"#));
        assert!(!json.contains("offset"));
    }
}
