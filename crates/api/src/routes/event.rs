//! Route definitions for the `/events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// Routes mounted at `/events`.
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
            get(event::list)
                .post(event::create)
                .delete(event::bulk_delete),
        )
        .route(
            "/{id}",
            get(event::get_by_id)
                .put(event::update)
                .patch(event::update)
                .delete(event::delete),
        )
}
