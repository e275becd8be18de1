//! Handlers for the `/apps` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use herald_core::error::CoreError;
use herald_core::validation::{prepare, validate_input};
use herald_db::models::application::{Application, CreateApplication, UpdateApplication};
use herald_db::models::listing::{BulkDelete, ListParams, Page};
use herald_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, JsonBody};
use crate::handlers::{empty_body, nothing_to_delete};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Application";

fn not_found(id: i64) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn name_conflict() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Application with the same name already exists".into(),
    ))
}

/// GET /api/apps
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Application>>> {
    validate_input(&params)?;
    let page = ApplicationRepo::list(&state.pool, &params).await?;
    Ok(Json(page))
}

/// POST /api/apps
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateApplication>,
) -> AppResult<(StatusCode, Json<Application>)> {
    let input = prepare(input)?;

    if ApplicationRepo::name_taken(&state.pool, &input.name, None).await? {
        return Err(name_conflict());
    }

    let app = ApplicationRepo::create(&state.pool, &input).await?;
    tracing::info!(application_id = app.id, user_id = user.user_id, "Application created");
    Ok((StatusCode::CREATED, Json(app)))
}

/// GET /api/apps/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Application>> {
    let app = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(app))
}

/// PUT|PATCH /api/apps/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdateApplication>,
) -> AppResult<Json<Application>> {
    if input.is_empty() {
        return Err(empty_body());
    }
    let input = prepare(input)?;

    ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(name) = &input.name {
        if ApplicationRepo::name_taken(&state.pool, name, Some(id)).await? {
            return Err(name_conflict());
        }
    }

    let app = ApplicationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(app))
}

/// DELETE /api/apps/{id}
///
/// Also soft-deletes the application's events and their notification types.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    if !ApplicationRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(application_id = id, user_id = user.user_id, "Application deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/apps
pub async fn bulk_delete(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BulkDelete>,
) -> AppResult<StatusCode> {
    validate_input(&input)?;

    let deleted = ApplicationRepo::soft_delete_many(&state.pool, &input.ids).await?;
    if deleted == 0 {
        return Err(nothing_to_delete());
    }
    tracing::info!(deleted, user_id = user.user_id, "Applications bulk deleted");
    Ok(StatusCode::NO_CONTENT)
}
