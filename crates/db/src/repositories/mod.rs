//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

mod listing;

pub mod application_repo;
pub mod event_repo;
pub mod message_repo;
pub mod notification_type_repo;
pub mod tag_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use event_repo::EventRepo;
pub use message_repo::MessageRepo;
pub use notification_type_repo::NotificationTypeRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
