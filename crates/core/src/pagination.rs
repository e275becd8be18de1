//! Page-window arithmetic and sort vocabulary shared by every list endpoint.
//!
//! A `page_number` of zero (or less) means "everything on one page"; any
//! positive page is clamped to the last page that actually has rows.

use serde::{Deserialize, Serialize};

/// Default number of rows per page when the caller does not send `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 3;

/// Columns a list may be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    CreatedAt,
    ModifiedAt,
    IsActive,
}

impl SortField {
    /// Column name as it appears in SQL. Only ever one of a fixed set.
    pub fn as_column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
            SortField::ModifiedAt => "modified_at",
            SortField::IsActive => "is_active",
        }
    }
}

/// Sort direction, sent on the wire as `1` (ascending) or `-1` (descending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i32")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl TryFrom<i32> for SortOrder {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SortOrder::Asc),
            -1 => Ok(SortOrder::Desc),
            other => Err(format!("sortOrder must be 1 or -1 (got {other})")),
        }
    }
}

/// The slice of a result set a list query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: i64,
    pub last_page: i64,
    /// `None` means no LIMIT (return every matching row).
    pub limit: Option<i64>,
    pub offset: i64,
}

/// Compute the page window for `total` matching rows.
///
/// - `page_number <= 0` or `total == 0` returns everything as page 1 of 1.
/// - `page_size < 1` is coerced to 1.
/// - A page past the end is clamped to the last page.
pub fn page_window(total: i64, page_number: i64, page_size: i64) -> PageWindow {
    if page_number <= 0 || total <= 0 {
        return PageWindow {
            current_page: 1,
            last_page: 1,
            limit: None,
            offset: 0,
        };
    }

    let size = page_size.max(1);
    // `total > 0` here, so this rounds up without overflowing.
    let last_page = (total - 1) / size + 1;
    let current_page = page_number.min(last_page);

    PageWindow {
        current_page,
        last_page,
        limit: Some(size),
        offset: (current_page - 1) * size,
    }
}
