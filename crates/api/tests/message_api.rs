//! HTTP-level integration tests for `/api/message`.
//!
//! Covers hierarchy activity checks, metadata validation against the
//! template's tags, and placeholder substitution.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_app, create_event, create_notification_type, get, patch_json, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

struct Hierarchy {
    app_id: i64,
    event_id: i64,
    nt_id: i64,
}

/// Seed an active app -> event -> notification type chain.
async fn seed(pool: &PgPool, template_body: &str) -> Hierarchy {
    let app_id = create_app(pool, "Storefront", true).await;
    let event_id = create_event(pool, app_id, "on-order", true).await;
    let nt_id = create_notification_type(pool, event_id, "receipt", template_body, true).await;
    Hierarchy {
        app_id,
        event_id,
        nt_id,
    }
}

async fn submit(pool: &PgPool, nt_id: i64, metadata: Value) -> axum::response::Response {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/message",
        json!({
            "notification_type_id": nt_id,
            "email": "customer@example.com",
            "metadata": metadata,
        }),
    )
    .await
}

async fn deactivate(pool: &PgPool, uri: String) {
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_message_is_rendered_and_pending(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}, you owe {{ amount }}. Bye {{name}}.").await;

    let response = submit(&pool, h.nt_id, json!({ "name": "Ada", "amount": 42 })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["body"], "Hi Ada, you owe 42. Bye Ada.");
    assert_eq!(json["subject"], "Important update");
    assert_eq!(json["email"], "customer@example.com");
    assert_eq!(json["is_pending"], true);
    assert!(json["delivered_at"].is_null());
    assert_eq!(json["notification_type_id"], h.nt_id);

    let id = json["id"].as_i64().unwrap();
    let response = get(common::build_test_app(pool), &format!("/api/message/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["body"], "Hi Ada, you owe 42. Bye Ada.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notification_type_alias_is_accepted(pool: PgPool) {
    let h = seed(&pool, "Plain body").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/message",
        json!({
            "notification_type": h.nt_id,
            "email": "customer@example.com",
            "metadata": {},
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["body"], "Plain body");
}

// ---------------------------------------------------------------------------
// Metadata validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_tag_returns_400(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}} on {{date}}").await;

    let response = submit(&pool, h.nt_id, json!({ "name": "Ada" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "\"date\" is required in metadata object"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_extra_tag_returns_400(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}").await;

    let response = submit(&pool, h.nt_id, json!({ "name": "Ada", "age": 36 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "\"age\" is not allowed in metadata object"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_email_returns_400(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/message",
        json!({
            "notification_type_id": h.nt_id,
            "email": "not-an-email",
            "metadata": { "name": "Ada" },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_metadata_defaults_to_empty_for_untagged_template(pool: PgPool) {
    let h = seed(&pool, "Your order has shipped.").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/message",
        json!({
            "notification_type_id": h.nt_id,
            "email": "customer@example.com",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["body"], "Your order has shipped.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_metadata_for_tagged_template_returns_400(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/message",
        json!({
            "notification_type_id": h.nt_id,
            "email": "customer@example.com",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "\"name\" is required in metadata object"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_notification_type_id_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/message",
        json!({ "email": "customer@example.com", "metadata": {} }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Hierarchy checks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_notification_type_returns_404(pool: PgPool) {
    let response = submit(&pool, 5150, json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_notification_type_returns_400(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}").await;
    deactivate(&pool, format!("/api/notification-types/{}", h.nt_id)).await;

    let response = submit(&pool, h.nt_id, json!({ "name": "Ada" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "The notification type is inactive."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_event_returns_400(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}").await;
    deactivate(&pool, format!("/api/events/{}", h.event_id)).await;

    let response = submit(&pool, h.nt_id, json!({ "name": "Ada" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "The event for this notification type is inactive."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_application_returns_400(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}").await;
    deactivate(&pool, format!("/api/apps/{}", h.app_id)).await;

    let response = submit(&pool, h.nt_id, json!({ "name": "Ada" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "The application for this notification type is inactive."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleted_notification_type_returns_404(pool: PgPool) {
    let h = seed(&pool, "Hi {{name}}").await;
    let response = common::delete(
        common::build_test_app(pool.clone()),
        &format!("/api/apps/{}", h.app_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = submit(&pool, h.nt_id, json!({ "name": "Ada" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_message_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/message/31337").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
