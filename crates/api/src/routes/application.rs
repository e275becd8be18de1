//! Route definitions for the `/apps` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/apps`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// DELETE /        -> bulk_delete
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(application::list)
                .post(application::create)
                .delete(application::bulk_delete),
        )
        .route(
            "/{id}",
            get(application::get_by_id)
                .put(application::update)
                .patch(application::update)
                .delete(application::delete),
        )
}
