//! Note input rules and list-window resolution.
//!
//! Listing is lenient by contract: malformed paging or sort values never fail
//! a request, they fall back to the defaults below.

use serde::Deserialize;
use validator::Validate;

/// Page size used when `limit` is absent, malformed, or not positive.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Ordering of a note listing by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// Parse the `sort` query value. Only `asc` and `desc` are recognised;
    /// anything else (including an empty value) means descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    /// SQL keyword for an `ORDER BY` clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Fully resolved paging and ordering for a note listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub limit: i64,
    pub offset: i64,
    pub direction: SortDirection,
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
            direction: SortDirection::Descending,
        }
    }
}

impl ListWindow {
    /// Resolve raw query-string values into a concrete window.
    pub fn resolve(limit: Option<&str>, offset: Option<&str>, sort: Option<&str>) -> Self {
        let limit = limit
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT);
        let offset = offset
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 0)
            .unwrap_or(0);

        Self {
            limit,
            offset,
            direction: SortDirection::parse(sort),
        }
    }
}

/// Request body for creating or replacing a note.
///
/// Missing fields deserialize as empty strings so they surface as
/// "required" validation errors rather than JSON errors.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NoteInput {
    #[serde(default)]
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub content: String,
}

impl NoteInput {
    /// Strip surrounding whitespace from title and content.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}
