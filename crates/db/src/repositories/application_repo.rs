//! Repository for the `applications` table.

use herald_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{Application, CreateApplication, UpdateApplication};
use crate::models::listing::{ListParams, Page};
use crate::repositories::listing::fetch_page;
use crate::repositories::EventRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, is_active, is_deleted, created_at, modified_at";

/// Provides CRUD operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (name, description, is_active)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find an application by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM applications WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an application by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated, filtered list of live applications.
    pub async fn list(
        pool: &PgPool,
        params: &ListParams,
    ) -> Result<Page<Application>, sqlx::Error> {
        fetch_page(pool, "applications", COLUMNS, None, params).await
    }

    /// Whether a live application already uses `name` (case-insensitive).
    ///
    /// `exclude_id` skips the row being renamed.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM applications
                WHERE LOWER(name) = LOWER($1)
                  AND is_deleted = FALSE
                  AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Update an application. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApplication,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active)
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an application and everything beneath it.
    ///
    /// Returns `true` if the application was live and is now deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = Self::soft_delete_many(pool, &[id]).await?;
        Ok(deleted > 0)
    }

    /// Soft-delete several applications, cascading to their events and those
    /// events' notification types in one transaction.
    ///
    /// Returns the number of applications that were flagged.
    pub async fn soft_delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let app_ids = sqlx::query_scalar::<_, DbId>(
            "UPDATE applications SET is_active = FALSE, is_deleted = TRUE
             WHERE id = ANY($1) AND is_deleted = FALSE
             RETURNING id",
        )
        .bind(ids)
        .fetch_all(&mut *tx)
        .await?;

        if !app_ids.is_empty() {
            let event_count = EventRepo::cascade_from_applications(&mut tx, &app_ids).await?;
            tracing::debug!(
                applications = app_ids.len(),
                events = event_count,
                "Cascaded application soft-delete"
            );
        }

        tx.commit().await?;
        Ok(app_ids.len() as u64)
    }
}
