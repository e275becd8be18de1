//! Custom extractors shared by the resource handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use herald_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A positive integer `{id}` path segment.
///
/// Anything else (non-numeric, zero, negative, overflowing) is rejected with
/// 404 `"Invalid ID."` instead of axum's default 400.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub DbId);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_id())?;
        parse_id(&raw).map(EntityId).ok_or_else(invalid_id)
    }
}

/// A JSON request body.
///
/// Malformed JSON, a missing or mistyped field, and a wrong content type are
/// all rejected with 400 instead of axum's default 415/422.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(bad_body)?;
        Ok(JsonBody(value))
    }
}

fn bad_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::BadRequest(rejection.body_text())
}

fn invalid_id() -> AppError {
    AppError::NotFound("Invalid ID.".into())
}

fn parse_id(raw: &str) -> Option<DbId> {
    raw.parse::<DbId>().ok().filter(|id| *id > 0)
}
