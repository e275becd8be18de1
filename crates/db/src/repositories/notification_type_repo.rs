//! Repository for the `notification_types` table.
//!
//! Every write derives `tags` from `template_body` and registers the labels
//! in the tag registry within the same transaction.

use herald_core::template::extract_tags;
use herald_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::{ListParams, Page};
use crate::models::notification_type::{
    CreateNotificationType, NotificationType, UpdateNotificationType,
};
use crate::repositories::listing::{fetch_page, Scope};
use crate::repositories::TagRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, template_subject, template_body, tags, \
                       is_active, is_deleted, event_id, created_at, modified_at";

/// Provides CRUD operations for notification types.
pub struct NotificationTypeRepo;

impl NotificationTypeRepo {
    /// Insert a new notification type, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotificationType,
    ) -> Result<NotificationType, sqlx::Error> {
        let tags = extract_tags(&input.template_body);
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO notification_types
                (name, description, template_subject, template_body, tags, is_active, event_id)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, COALESCE($6, FALSE), $7)
             RETURNING {COLUMNS}"
        );
        let notification_type = sqlx::query_as::<_, NotificationType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.template_subject)
            .bind(&input.template_body)
            .bind(&tags)
            .bind(input.is_active)
            .bind(input.event_id)
            .fetch_one(&mut *tx)
            .await?;

        TagRepo::upsert_labels(&mut *tx, &tags).await?;

        tx.commit().await?;
        Ok(notification_type)
    }

    /// Find a notification type by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NotificationType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_types WHERE id = $1 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, NotificationType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a notification type by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NotificationType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_types WHERE id = $1");
        sqlx::query_as::<_, NotificationType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated, filtered list of the live notification types of one event.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
        params: &ListParams,
    ) -> Result<Page<NotificationType>, sqlx::Error> {
        let scope = Scope {
            column: "event_id",
            id: event_id,
        };
        fetch_page(pool, "notification_types", COLUMNS, Some(scope), params).await
    }

    /// Whether a live notification type of `event_id` already uses `name`
    /// (case-insensitive).
    pub async fn name_taken(
        pool: &PgPool,
        event_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM notification_types
                WHERE event_id = $1
                  AND LOWER(name) = LOWER($2)
                  AND is_deleted = FALSE
                  AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(event_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Update a notification type. Only non-`None` fields in `input` are applied;
    /// a new `template_body` also replaces `tags`.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNotificationType,
    ) -> Result<Option<NotificationType>, sqlx::Error> {
        let tags = input.template_body.as_deref().map(extract_tags);
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE notification_types SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                template_subject = COALESCE($4, template_subject),
                template_body = COALESCE($5, template_body),
                tags = COALESCE($6, tags),
                is_active = COALESCE($7, is_active)
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, NotificationType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.template_subject)
            .bind(&input.template_body)
            .bind(&tags)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(_), Some(tags)) = (&updated, &tags) {
            TagRepo::upsert_labels(&mut *tx, tags).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Soft-delete a notification type. Returns `true` if a live row was flagged.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = Self::soft_delete_many(pool, &[id]).await?;
        Ok(deleted > 0)
    }

    /// Soft-delete several notification types. Returns the number flagged.
    pub async fn soft_delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notification_types SET is_active = FALSE, is_deleted = TRUE
             WHERE id = ANY($1) AND is_deleted = FALSE",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Flag every live notification type of the given events as deleted.
    /// Runs inside the caller's transaction.
    pub(crate) async fn cascade_from_events(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notification_types SET is_active = FALSE, is_deleted = TRUE
             WHERE event_id = ANY($1) AND is_deleted = FALSE",
        )
        .bind(event_ids)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}
