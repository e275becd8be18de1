//! Shared helpers for HTTP-level integration tests.
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`,
//! no TCP listener involved.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use herald_api::auth::jwt::{generate_token, JwtConfig};
use herald_api::config::ServerConfig;
use herald_api::router::build_app_router;
use herald_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the full application router, with production middleware, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// `Bearer <token>` for a synthetic user. Auth only checks the signature,
/// so no user row is needed.
pub fn bearer() -> String {
    let token = generate_token(1, "tester@example.com", &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, bearer());
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Send an arbitrary request without adding any auth header.
pub async fn send_raw(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn delete_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::DELETE, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create an application through the API and return its id.
pub async fn create_app(pool: &PgPool, name: &str, is_active: bool) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/apps",
        json!({ "name": name, "is_active": is_active }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating application {name}");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create an event through the API and return its id.
pub async fn create_event(pool: &PgPool, application_id: i64, name: &str, is_active: bool) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/events",
        json!({ "name": name, "is_active": is_active, "application_id": application_id }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating event {name}");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a notification type through the API and return its id.
pub async fn create_notification_type(
    pool: &PgPool,
    event_id: i64,
    name: &str,
    template_body: &str,
    is_active: bool,
) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/notification-types",
        json!({
            "name": name,
            "template_subject": "Important update",
            "template_body": template_body,
            "is_active": is_active,
            "event_id": event_id,
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating notification type {name}");
    body_json(response).await["id"].as_i64().unwrap()
}
