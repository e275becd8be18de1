pub mod application;
pub mod auth;
pub mod event;
pub mod message;
pub mod notification_type;
pub mod tag;

use crate::error::AppError;

/// Message returned when an update carries no recognised field.
pub(crate) const EMPTY_BODY: &str = "The request body should not be empty";

/// Message returned when a bulk delete matched no live row.
pub(crate) const NOTHING_TO_DELETE: &str = "Nothing to delete.";

pub(crate) fn empty_body() -> AppError {
    AppError::BadRequest(EMPTY_BODY.into())
}

pub(crate) fn nothing_to_delete() -> AppError {
    AppError::NotFound(NOTHING_TO_DELETE.into())
}
