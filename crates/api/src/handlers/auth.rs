//! Handlers for the `/auth` resource (login, register).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use herald_core::error::CoreError;
use herald_core::validation::{prepare, trim_in_place, Normalize};
use herald_db::models::user::CreateUser;
use herald_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth` and `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(
        length(min = 5, max = 50, message = "length must be between 5 and 50"),
        email(message = "must be a valid email")
    )]
    pub email: String,
    #[validate(length(min = 5, max = 255, message = "length must be between 5 and 255"))]
    pub password: String,
}

impl Normalize for Credentials {
    fn normalize(&mut self) {
        trim_in_place(&mut self.email);
    }
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth
///
/// Exchange email + password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<Credentials>,
) -> AppResult<Json<TokenResponse>> {
    let input = prepare(input)?;

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = issue_token(&state, user.id, &user.email)?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth/register
///
/// Create an account and return a token for it.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<Credentials>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let input = prepare(input)?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User with same email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
        },
    )
    .await?;

    let token = issue_token(&state, user.id, &user.email)?;
    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

fn issue_token(state: &AppState, user_id: i64, email: &str) -> AppResult<String> {
    generate_token(user_id, email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
