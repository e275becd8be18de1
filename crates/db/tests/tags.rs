//! Integration tests for tag extraction on notification types and the
//! tag registry.

use herald_db::models::application::CreateApplication;
use herald_db::models::event::CreateEvent;
use herald_db::models::notification_type::{CreateNotificationType, UpdateNotificationType};
use herald_db::repositories::{ApplicationRepo, EventRepo, NotificationTypeRepo, TagRepo};
use sqlx::PgPool;

async fn seed_event(pool: &PgPool) -> i64 {
    let app = ApplicationRepo::create(
        pool,
        &CreateApplication {
            name: "Tagging".to_string(),
            description: None,
            is_active: Some(true),
        },
    )
    .await
    .unwrap();
    let event = EventRepo::create(
        pool,
        &CreateEvent {
            name: "on-order".to_string(),
            description: None,
            is_active: Some(true),
            application_id: app.id,
        },
    )
    .await
    .unwrap();
    event.id
}

fn new_notification_type(event_id: i64, name: &str, body: &str) -> CreateNotificationType {
    CreateNotificationType {
        name: name.to_string(),
        description: None,
        template_subject: "Your order".to_string(),
        template_body: body.to_string(),
        is_active: Some(true),
        event_id,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_derives_tags_and_registers_them(pool: PgPool) {
    let event_id = seed_event(&pool).await;

    let nt = NotificationTypeRepo::create(
        &pool,
        &new_notification_type(event_id, "receipt", "Hi {{ name }}, order {{order}} for {{name}}"),
    )
    .await
    .unwrap();

    assert_eq!(nt.tags, ["name", "order"]);
    assert_eq!(TagRepo::list_labels(&pool).await.unwrap(), ["name", "order"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_registry_deduplicates_labels(pool: PgPool) {
    let event_id = seed_event(&pool).await;

    NotificationTypeRepo::create(&pool, &new_notification_type(event_id, "first", "{{a}} {{b}}"))
        .await
        .unwrap();
    NotificationTypeRepo::create(&pool, &new_notification_type(event_id, "second", "{{b}} {{c}}"))
        .await
        .unwrap();

    assert_eq!(TagRepo::list_labels(&pool).await.unwrap(), ["a", "b", "c"]);

    let inserted = TagRepo::upsert_labels(&pool, &["c".to_string(), "d".to_string()])
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    assert_eq!(TagRepo::list_labels(&pool).await.unwrap(), ["a", "b", "c", "d"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_long_labels_are_registered(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let tag = "x".repeat(400);

    let nt = NotificationTypeRepo::create(
        &pool,
        &new_notification_type(event_id, "verbose", &format!("Dear {{{{{tag}}}}}")),
    )
    .await
    .unwrap();

    assert_eq!(nt.tags, [tag.clone()]);
    assert_eq!(TagRepo::list_labels(&pool).await.unwrap(), [tag]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_body_regenerates_tags(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let nt = NotificationTypeRepo::create(
        &pool,
        &new_notification_type(event_id, "receipt", "Hello {{name}}"),
    )
    .await
    .unwrap();

    let update = UpdateNotificationType {
        template_body: Some("Shipped to {{address}} on {{date}}".to_string()),
        ..Default::default()
    };
    let updated = NotificationTypeRepo::update(&pool, nt.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.tags, ["address", "date"]);

    // Registry keeps old labels and gains the new ones.
    assert_eq!(
        TagRepo::list_labels(&pool).await.unwrap(),
        ["address", "date", "name"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_without_body_keeps_tags(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let nt = NotificationTypeRepo::create(
        &pool,
        &new_notification_type(event_id, "receipt", "Hello {{name}}"),
    )
    .await
    .unwrap();

    let update = UpdateNotificationType {
        name: Some("renamed".to_string()),
        ..Default::default()
    };
    let updated = NotificationTypeRepo::update(&pool, nt.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.tags, ["name"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_template_without_tags_stores_empty_set(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let nt = NotificationTypeRepo::create(
        &pool,
        &new_notification_type(event_id, "plain", "no tags here"),
    )
    .await
    .unwrap();

    assert!(nt.tags.is_empty());
    assert!(TagRepo::list_labels(&pool).await.unwrap().is_empty());
}
