//! Repository for the `messages` table.

use herald_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, subject, body, email, is_pending, notification_type_id, created_at, delivered_at";

/// Provides insert and lookup for rendered messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Persist a rendered message as pending delivery.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (subject, body, email, is_pending, notification_type_id)
             VALUES ($1, $2, $3, TRUE, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(&input.subject)
            .bind(&input.body)
            .bind(&input.email)
            .bind(input.notification_type_id)
            .fetch_one(pool)
            .await
    }

    /// Find a message by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
