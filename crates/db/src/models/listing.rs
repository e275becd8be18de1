//! Query-string parameters and response envelope for paginated lists.

use herald_core::pagination::{SortField, SortOrder, DEFAULT_PAGE_SIZE};
use herald_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Filter, sort and page parameters shared by every list endpoint.
///
/// Field names follow the public query-string contract
/// (`?like=&sortBy=&sortOrder=&pageNumber=&pageSize=&isActive=`).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Case-insensitive substring match on `name`.
    #[validate(length(min = 1, max = 50, message = "length must be between 1 and 50"))]
    pub like: Option<String>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// `0` (the default) returns every matching row.
    #[serde(default)]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    pub is_active: Option<bool>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            like: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            is_active: None,
        }
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// `?application=<id>` scope required when listing events.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApplicationScope {
    pub application: DbId,
}

/// `?event=<id>` scope required when listing notification types.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EventScope {
    pub event: DbId,
}

/// One page of a list query.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub current_page: i64,
    pub last_page: i64,
    pub total_count: i64,
    pub results: Vec<T>,
}

/// Request body for bulk soft-delete endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkDelete {
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub ids: Vec<DbId>,
}
