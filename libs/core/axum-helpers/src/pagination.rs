//! Offset pagination shared by the listing endpoints.
//!
//! Query parameters are parsed leniently: `?limit=abc` or `?limit=0` falls back
//! to the endpoint default rather than rejecting the request, and a leading
//! number is accepted the way `parseInt` would (`?limit=15rows` is 15).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Upper bound for any requested page size
pub const MAX_LIMIT: u64 = 1000;

/// Raw `limit` / `offset` query parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of records to return
    #[param(value_type = Option<u64>)]
    pub limit: Option<String>,
    /// Number of records to skip (default: 0)
    #[param(value_type = Option<u64>)]
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.map(|v| v.to_string()),
            offset: offset.map(|v| v.to_string()),
        }
    }

    /// The caller's limit, if it is a positive number. Clamped to [`MAX_LIMIT`].
    pub fn limit(&self) -> Option<u64> {
        self.limit
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|limit| *limit > 0)
            .map(|limit| limit.min(MAX_LIMIT as i64) as u64)
    }

    /// The caller's offset; anything unparseable or negative is 0.
    pub fn offset(&self) -> u64 {
        self.offset
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|offset| *offset > 0)
            .map_or(0, |offset| offset as u64)
    }

    /// Resolve against an endpoint-specific default limit.
    pub fn page(&self, default_limit: u64) -> PageRequest {
        PageRequest {
            limit: self.limit().unwrap_or(default_limit),
            offset: self.offset(),
        }
    }
}

/// A resolved page window. `limit` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.max(1),
            offset,
        }
    }
}

/// Pagination block returned next to a page of records.
///
/// `currentPage` and `totalPages` are only present for table pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

impl Pagination {
    /// Full pagination including page numbers.
    ///
    /// - `hasMore = offset + limit < total`
    /// - `currentPage = offset / limit + 1`
    /// - `totalPages = ceil(total / limit)`
    pub fn new(page: PageRequest, total: u64) -> Self {
        let limit = page.limit.max(1);
        Self {
            current_page: Some(page.offset / limit + 1),
            total_pages: Some(total.div_ceil(limit)),
            ..Self::window(page, total)
        }
    }

    /// Offset window without page numbers.
    pub fn window(page: PageRequest, total: u64) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            total,
            has_more: page.offset.saturating_add(page.limit) < total,
            current_page: None,
            total_pages: None,
        }
    }
}

/// Parse a leading integer, ignoring trailing garbage: `" 42abc"` is 42,
/// `"-3"` is -3, `"abc"` is `None`.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, offset: Option<&str>) -> PageQuery {
        PageQuery {
            limit: limit.map(String::from),
            offset: offset.map(String::from),
        }
    }

    #[test]
    fn test_defaults_apply_when_missing() {
        let page = query(None, None).page(10);
        assert_eq!(page, PageRequest { limit: 10, offset: 0 });
    }

    #[test]
    fn test_invalid_or_zero_limit_uses_default() {
        assert_eq!(query(Some("abc"), None).page(5).limit, 5);
        assert_eq!(query(Some("0"), None).page(5).limit, 5);
        assert_eq!(query(Some("-4"), None).page(5).limit, 5);
        assert_eq!(query(Some(""), None).page(5).limit, 5);
    }

    #[test]
    fn test_leading_digits_are_accepted() {
        assert_eq!(query(Some("15rows"), Some(" 30")).page(10), PageRequest { limit: 15, offset: 30 });
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(query(Some("999999999999"), None).page(10).limit, MAX_LIMIT);
        assert_eq!(query(Some("99999999999999999999999"), None).page(10).limit, MAX_LIMIT);
    }

    #[test]
    fn test_negative_offset_is_zero() {
        assert_eq!(query(None, Some("-20")).offset(), 0);
        assert_eq!(query(None, Some("x")).offset(), 0);
    }

    #[test]
    fn test_explicit_limit() {
        assert_eq!(PageQuery::new(Some(3), None).limit(), Some(3));
        assert_eq!(PageQuery::default().limit(), None);
    }

    #[test]
    fn test_pagination_arithmetic() {
        let pagination = Pagination::new(PageRequest::new(10, 20), 45);
        assert!(pagination.has_more);
        assert_eq!(pagination.current_page, Some(3));
        assert_eq!(pagination.total_pages, Some(5));

        let last = Pagination::new(PageRequest::new(10, 40), 45);
        assert!(!last.has_more);
        assert_eq!(last.current_page, Some(5));
    }

    #[test]
    fn test_pagination_empty_table() {
        let pagination = Pagination::new(PageRequest::new(10, 0), 0);
        assert!(!pagination.has_more);
        assert_eq!(pagination.current_page, Some(1));
        assert_eq!(pagination.total_pages, Some(0));
    }

    #[test]
    fn test_offset_not_multiple_of_limit() {
        let pagination = Pagination::new(PageRequest::new(10, 15), 100);
        assert_eq!(pagination.current_page, Some(2));
    }

    #[test]
    fn test_window_serializes_without_page_numbers() {
        let json = serde_json::to_value(Pagination::window(PageRequest::new(20, 0), 3)).unwrap();
        assert_eq!(json, serde_json::json!({"limit": 20, "offset": 0, "total": 3, "hasMore": false}));
    }

    #[test]
    fn test_full_pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(PageRequest::new(10, 0), 11)).unwrap();
        assert_eq!(json["hasMore"], true);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 2);
    }
}
