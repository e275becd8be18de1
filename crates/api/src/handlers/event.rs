//! Handlers for the `/events` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use herald_core::error::CoreError;
use herald_core::validation::{prepare, validate_input};
use herald_db::models::event::{CreateEvent, Event, UpdateEvent};
use herald_db::models::listing::{ApplicationScope, BulkDelete, ListParams, Page};
use herald_db::repositories::{ApplicationRepo, EventRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, JsonBody};
use crate::handlers::{empty_body, nothing_to_delete};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Event";

fn not_found(id: i64) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn name_conflict() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Event with the same name already exists".into(),
    ))
}

/// GET /api/events?application={id}
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(scope): Query<ApplicationScope>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Event>>> {
    validate_input(&params)?;
    let page = EventRepo::list_by_application(&state.pool, scope.application, &params).await?;
    Ok(Json(page))
}

/// POST /api/events
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let input = prepare(input)?;

    if ApplicationRepo::find_by_id(&state.pool, input.application_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(
            "The application with the given ID was not found.".into(),
        ));
    }

    if EventRepo::name_taken(&state.pool, input.application_id, &input.name, None).await? {
        return Err(name_conflict());
    }

    let event = EventRepo::create(&state.pool, &input).await?;
    tracing::info!(
        event_id = event.id,
        application_id = event.application_id,
        user_id = user.user_id,
        "Event created"
    );
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// PUT|PATCH /api/events/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdateEvent>,
) -> AppResult<Json<Event>> {
    if input.is_empty() {
        return Err(empty_body());
    }
    let input = prepare(input)?;

    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(name) = &input.name {
        if EventRepo::name_taken(&state.pool, existing.application_id, name, Some(id)).await? {
            return Err(name_conflict());
        }
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// DELETE /api/events/{id}
///
/// Also soft-deletes the event's notification types.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    if !EventRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(event_id = id, user_id = user.user_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/events
pub async fn bulk_delete(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BulkDelete>,
) -> AppResult<StatusCode> {
    validate_input(&input)?;

    let deleted = EventRepo::soft_delete_many(&state.pool, &input.ids).await?;
    if deleted == 0 {
        return Err(nothing_to_delete());
    }
    tracing::info!(deleted, user_id = user.user_id, "Events bulk deleted");
    Ok(StatusCode::NO_CONTENT)
}
