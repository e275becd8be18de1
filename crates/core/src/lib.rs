//! Domain logic for the Herald notification-configuration service.
//!
//! Nothing in this crate performs I/O. It holds the shared error type, the
//! pagination arithmetic used by every list endpoint, and the template engine
//! that turns a notification type plus metadata into a message body.

pub mod error;
pub mod pagination;
pub mod template;
pub mod types;
pub mod validation;
