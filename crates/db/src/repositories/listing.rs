//! Shared paginated-list query used by every entity repository.
//!
//! Builds a `COUNT(*)` and a page `SELECT` over the same dynamic WHERE clause:
//! live rows only, an optional parent scope, an optional name filter and an
//! optional `is_active` filter.

use herald_core::pagination::page_window;
use herald_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::models::listing::{ListParams, Page};

/// Restricts a list to the children of one parent row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    pub column: &'static str,
    pub id: DbId,
}

/// Run a filtered, sorted, paginated query against `table`.
pub(crate) async fn fetch_page<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    scope: Option<Scope>,
    params: &ListParams,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + serde::Serialize + Send + Unpin,
{
    let like = params
        .like
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(like_pattern);

    // Build dynamic WHERE clauses.
    let mut conditions = vec!["is_deleted = FALSE".to_string()];
    let mut bind_idx = 1u32;

    if let Some(scope) = scope {
        conditions.push(format!("{} = ${bind_idx}", scope.column));
        bind_idx += 1;
    }
    if like.is_some() {
        conditions.push(format!("name ILIKE ${bind_idx}"));
        bind_idx += 1;
    }
    if params.is_active.is_some() {
        conditions.push(format!("is_active = ${bind_idx}"));
        bind_idx += 1;
    }
    let where_clause = conditions.join(" AND ");

    let count_query = format!("SELECT COUNT(*) FROM {table} WHERE {where_clause}");
    let mut count = sqlx::query_scalar::<_, i64>(&count_query);
    if let Some(scope) = scope {
        count = count.bind(scope.id);
    }
    if let Some(ref pattern) = like {
        count = count.bind(pattern.clone());
    }
    if let Some(is_active) = params.is_active {
        count = count.bind(is_active);
    }
    let total_count = count.fetch_one(pool).await?;

    let window = page_window(total_count, params.page_number, params.page_size);

    let mut select_query = format!(
        "SELECT {columns} FROM {table} WHERE {where_clause} ORDER BY {} {}, id ASC",
        params.sort_by.as_column(),
        params.sort_order.as_sql(),
    );
    if window.limit.is_some() {
        select_query.push_str(&format!(" LIMIT ${bind_idx} OFFSET ${}", bind_idx + 1));
    }

    let mut q = sqlx::query_as::<_, T>(&select_query);
    if let Some(scope) = scope {
        q = q.bind(scope.id);
    }
    if let Some(ref pattern) = like {
        q = q.bind(pattern.clone());
    }
    if let Some(is_active) = params.is_active {
        q = q.bind(is_active);
    }
    if let Some(limit) = window.limit {
        q = q.bind(limit).bind(window.offset);
    }
    let results = q.fetch_all(pool).await?;

    tracing::debug!(
        table,
        total_count,
        current_page = window.current_page,
        last_page = window.last_page,
        "Fetched list page"
    );

    Ok(Page {
        current_page: window.current_page,
        last_page: window.last_page,
        total_count,
        results,
    })
}

/// Wrap a user-supplied fragment for `ILIKE`, matching `%`, `_` and `\` literally.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fragment_is_wrapped() {
        assert_eq!(like_pattern("app"), "%app%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
