//! Repository for the `events` table.

use herald_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, UpdateEvent};
use crate::models::listing::{ListParams, Page};
use crate::repositories::listing::{fetch_page, Scope};
use crate::repositories::NotificationTypeRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, is_active, is_deleted, application_id, created_at, modified_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (name, description, is_active, application_id)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, FALSE), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .bind(input.application_id)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated, filtered list of the live events of one application.
    pub async fn list_by_application(
        pool: &PgPool,
        application_id: DbId,
        params: &ListParams,
    ) -> Result<Page<Event>, sqlx::Error> {
        let scope = Scope {
            column: "application_id",
            id: application_id,
        };
        fetch_page(pool, "events", COLUMNS, Some(scope), params).await
    }

    /// Whether a live event of `application_id` already uses `name` (case-insensitive).
    pub async fn name_taken(
        pool: &PgPool,
        application_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM events
                WHERE application_id = $1
                  AND LOWER(name) = LOWER($2)
                  AND is_deleted = FALSE
                  AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(application_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active)
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an event and its notification types.
    ///
    /// Returns `true` if the event was live and is now deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = Self::soft_delete_many(pool, &[id]).await?;
        Ok(deleted > 0)
    }

    /// Soft-delete several events, cascading to their notification types in
    /// one transaction. Returns the number of events that were flagged.
    pub async fn soft_delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let event_ids = sqlx::query_scalar::<_, DbId>(
            "UPDATE events SET is_active = FALSE, is_deleted = TRUE
             WHERE id = ANY($1) AND is_deleted = FALSE
             RETURNING id",
        )
        .bind(ids)
        .fetch_all(&mut *tx)
        .await?;

        if !event_ids.is_empty() {
            NotificationTypeRepo::cascade_from_events(&mut tx, &event_ids).await?;
        }

        tx.commit().await?;
        Ok(event_ids.len() as u64)
    }

    /// Flag every live event of the given applications as deleted, then
    /// cascade to their notification types. Runs inside the caller's
    /// transaction and returns the number of events flagged.
    pub(crate) async fn cascade_from_applications(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        application_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let event_ids = sqlx::query_scalar::<_, DbId>(
            "UPDATE events SET is_active = FALSE, is_deleted = TRUE
             WHERE application_id = ANY($1) AND is_deleted = FALSE
             RETURNING id",
        )
        .bind(application_ids)
        .fetch_all(&mut **tx)
        .await?;

        if !event_ids.is_empty() {
            NotificationTypeRepo::cascade_from_events(tx, &event_ids).await?;
        }

        Ok(event_ids.len() as u64)
    }
}
