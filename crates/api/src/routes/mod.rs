pub mod application;
pub mod auth;
pub mod event;
pub mod health;
pub mod message;
pub mod notification_type;
pub mod tag;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth                                  login (public)
/// /auth/register                         register (public)
///
/// /apps                                  list, create, bulk delete
/// /apps/{id}                             get, update, delete
///
/// /events                                list (?application=), create, bulk delete
/// /events/{id}                           get, update, delete
///
/// /notification-types                    list (?event=), create, bulk delete
/// /notification-types/{id}               get, update, delete
///
/// /message                               create
/// /message/{id}                          get
///
/// /tags                                  list labels
/// ```
///
/// Everything outside `/auth` requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/apps", application::router())
        .nest("/events", event::router())
        .nest("/notification-types", notification_type::router())
        .nest("/message", message::router())
        .nest("/tags", tag::router())
}
