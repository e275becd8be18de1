//! Event entity model and DTOs.

use herald_core::types::{DbId, Timestamp};
use herald_core::validation::{trim_in_place, trim_opt_in_place, Normalize};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub application_id: DbId,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
}

/// DTO for creating a new event under an application.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 3, max = 50, message = "length must be between 3 and 50"))]
    pub name: String,
    #[validate(length(max = 255, message = "length must be at most 255"))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub application_id: DbId,
}

/// DTO for updating an existing event. The owning application cannot change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 3, max = 50, message = "length must be between 3 and 50"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "length must be at most 255"))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateEvent {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_active.is_none()
    }
}

impl Normalize for CreateEvent {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_opt_in_place(&mut self.description);
    }
}

impl Normalize for UpdateEvent {
    fn normalize(&mut self) {
        trim_opt_in_place(&mut self.name);
        trim_opt_in_place(&mut self.description);
    }
}
