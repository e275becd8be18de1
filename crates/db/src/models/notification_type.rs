//! Notification type entity model and DTOs.
//!
//! `tags` is never accepted from clients: it is re-derived from
//! `template_body` by the repository on every create and update.

use herald_core::types::{DbId, Timestamp};
use herald_core::validation::{trim_in_place, trim_opt_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notification_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationType {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub template_subject: String,
    pub template_body: String,
    pub tags: Vec<String>,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub event_id: DbId,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
}

/// DTO for creating a new notification type under an event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationType {
    #[validate(length(min = 3, max = 50, message = "length must be between 3 and 50"))]
    pub name: String,
    #[validate(length(max = 255, message = "length must be at most 255"))]
    pub description: Option<String>,
    #[validate(length(min = 5, max = 255, message = "length must be between 5 and 255"))]
    pub template_subject: String,
    #[validate(length(min = 5, message = "length must be at least 5"))]
    pub template_body: String,
    pub is_active: Option<bool>,
    pub event_id: DbId,
}

/// DTO for updating a notification type. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNotificationType {
    #[validate(length(min = 3, max = 50, message = "length must be between 3 and 50"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "length must be at most 255"))]
    pub description: Option<String>,
    #[validate(length(min = 5, max = 255, message = "length must be between 5 and 255"))]
    pub template_subject: Option<String>,
    #[validate(length(min = 5, message = "length must be at least 5"))]
    pub template_body: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateNotificationType {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.template_subject.is_none()
            && self.template_body.is_none()
            && self.is_active.is_none()
    }
}

impl Normalize for CreateNotificationType {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_opt_in_place(&mut self.description);
        trim_in_place(&mut self.template_subject);
    }
}

impl Normalize for UpdateNotificationType {
    fn normalize(&mut self) {
        trim_opt_in_place(&mut self.name);
        trim_opt_in_place(&mut self.description);
        trim_opt_in_place(&mut self.template_subject);
    }
}
