//! Handlers for the `/notification-types` resource.
//!
//! `tags` is always derived from `template_body` by the repository; the
//! request DTOs have no `tags` field, so a client-supplied value is ignored.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use herald_core::error::CoreError;
use herald_core::validation::{prepare, validate_input};
use herald_db::models::listing::{BulkDelete, EventScope, ListParams, Page};
use herald_db::models::notification_type::{
    CreateNotificationType, NotificationType, UpdateNotificationType,
};
use herald_db::repositories::{EventRepo, NotificationTypeRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, JsonBody};
use crate::handlers::{empty_body, nothing_to_delete};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "NotificationType";

fn not_found(id: i64) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn name_conflict() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Notification type with the same name and event ID already exists".into(),
    ))
}

/// GET /api/notification-types?event={id}
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(scope): Query<EventScope>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<NotificationType>>> {
    validate_input(&params)?;
    let page = NotificationTypeRepo::list_by_event(&state.pool, scope.event, &params).await?;
    Ok(Json(page))
}

/// POST /api/notification-types
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateNotificationType>,
) -> AppResult<(StatusCode, Json<NotificationType>)> {
    let input = prepare(input)?;

    if EventRepo::find_by_id(&state.pool, input.event_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(
            "The event with the given ID was not found.".into(),
        ));
    }

    if NotificationTypeRepo::name_taken(&state.pool, input.event_id, &input.name, None).await? {
        return Err(name_conflict());
    }

    let notification_type = NotificationTypeRepo::create(&state.pool, &input).await?;
    tracing::info!(
        notification_type_id = notification_type.id,
        event_id = notification_type.event_id,
        tags = ?notification_type.tags,
        user_id = user.user_id,
        "Notification type created"
    );
    Ok((StatusCode::CREATED, Json(notification_type)))
}

/// GET /api/notification-types/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<NotificationType>> {
    let notification_type = NotificationTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(notification_type))
}

/// PUT|PATCH /api/notification-types/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdateNotificationType>,
) -> AppResult<Json<NotificationType>> {
    if input.is_empty() {
        return Err(empty_body());
    }
    let input = prepare(input)?;

    let existing = NotificationTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(name) = &input.name {
        if NotificationTypeRepo::name_taken(&state.pool, existing.event_id, name, Some(id))
            .await?
        {
            return Err(name_conflict());
        }
    }

    let notification_type = NotificationTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(notification_type))
}

/// DELETE /api/notification-types/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    if !NotificationTypeRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(notification_type_id = id, user_id = user.user_id, "Notification type deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/notification-types
pub async fn bulk_delete(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BulkDelete>,
) -> AppResult<StatusCode> {
    validate_input(&input)?;

    let deleted = NotificationTypeRepo::soft_delete_many(&state.pool, &input.ids).await?;
    if deleted == 0 {
        return Err(nothing_to_delete());
    }
    tracing::info!(deleted, user_id = user.user_id, "Notification types bulk deleted");
    Ok(StatusCode::NO_CONTENT)
}
