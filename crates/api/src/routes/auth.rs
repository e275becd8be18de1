//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /           -> login
/// POST /register   -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(auth::login))
        .route("/register", post(auth::register))
}
