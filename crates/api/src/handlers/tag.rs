//! Handlers for the `/tags` resource.

use axum::extract::State;
use axum::Json;
use herald_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/tags
///
/// Every label ever registered, sorted alphabetically.
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let labels = TagRepo::list_labels(&state.pool).await?;
    Ok(Json(labels))
}
