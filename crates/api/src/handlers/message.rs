//! Handlers for the `/message` resource.
//!
//! Submitting a message walks the hierarchy upward (notification type,
//! event, application), requires every level to be active, renders the
//! template against the caller's metadata and stores the result as pending.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use herald_core::error::CoreError;
use herald_core::template::render;
use herald_core::validation::prepare;
use herald_db::models::message::{CreateMessage, Message, SubmitMessage};
use herald_db::repositories::{ApplicationRepo, EventRepo, MessageRepo, NotificationTypeRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, JsonBody};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/message
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SubmitMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let input = prepare(input)?;
    let nt_id = input.notification_type_id;

    let notification_type = NotificationTypeRepo::find_by_id(&state.pool, nt_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "NotificationType",
            id: nt_id,
        }))?;
    if !notification_type.is_active {
        return Err(AppError::BadRequest(
            "The notification type is inactive.".into(),
        ));
    }

    let event = EventRepo::find_by_id(&state.pool, notification_type.event_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Unknown event {} referenced by notification type {nt_id}",
                notification_type.event_id
            ))
        })?;
    if !event.is_active {
        return Err(AppError::BadRequest(
            "The event for this notification type is inactive.".into(),
        ));
    }

    let application = ApplicationRepo::find_by_id(&state.pool, event.application_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Unknown application {} referenced by event {} (notification type {nt_id})",
                event.application_id, event.id
            ))
        })?;
    if !application.is_active {
        return Err(AppError::BadRequest(
            "The application for this notification type is inactive.".into(),
        ));
    }

    let body = render(
        &notification_type.template_body,
        &notification_type.tags,
        &input.metadata,
    )?;

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            subject: notification_type.template_subject,
            body,
            email: input.email,
            notification_type_id: nt_id,
        },
    )
    .await?;

    tracing::info!(
        message_id = message.id,
        notification_type_id = nt_id,
        user_id = user.user_id,
        "Message queued"
    );
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/message/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Message>> {
    let message = MessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Message",
            id,
        }))?;
    Ok(Json(message))
}
