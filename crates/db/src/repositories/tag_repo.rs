//! Repository for the `tags` registry.
//!
//! Labels are only ever inserted (never updated or removed); inserting an
//! existing label is a no-op.

use sqlx::{PgExecutor, PgPool};

/// Provides insert-if-absent and listing for tag labels.
pub struct TagRepo;

impl TagRepo {
    /// Register `labels`, ignoring ones that already exist.
    ///
    /// Returns the number of labels that were new.
    pub async fn upsert_labels<'e, E>(executor: E, labels: &[String]) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if labels.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO tags (label)
             SELECT UNNEST($1::TEXT[])
             ON CONFLICT (label) DO NOTHING",
        )
        .bind(labels)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// List every registered label, alphabetically.
    pub async fn list_labels(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT label FROM tags ORDER BY label")
            .fetch_all(pool)
            .await
    }
}
