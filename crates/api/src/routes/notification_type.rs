//! Route definitions for the `/notification-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification_type;
use crate::state::AppState;

/// Routes mounted at `/notification-types`.
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
            get(notification_type::list)
                .post(notification_type::create)
                .delete(notification_type::bulk_delete),
        )
        .route(
            "/{id}",
            get(notification_type::get_by_id)
                .put(notification_type::update)
                .patch(notification_type::update)
                .delete(notification_type::delete),
        )
}
