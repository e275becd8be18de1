//! Message entity model and DTOs.

use herald_core::types::{DbId, Timestamp};
use herald_core::validation::{trim_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A rendered message row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub subject: String,
    pub body: String,
    pub email: String,
    pub is_pending: bool,
    pub notification_type_id: DbId,
    pub created_at: Timestamp,
    pub delivered_at: Option<Timestamp>,
}

/// Request body for submitting a message against a notification type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitMessage {
    #[serde(alias = "notification_type")]
    pub notification_type_id: DbId,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    /// Values for every tag of the notification type, keyed by tag name.
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn empty_metadata() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Normalize for SubmitMessage {
    fn normalize(&mut self) {
        trim_in_place(&mut self.email);
    }
}

/// Insert DTO for an already-rendered message.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub subject: String,
    pub body: String,
    pub email: String,
    pub notification_type_id: DbId,
}
