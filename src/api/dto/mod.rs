//! Data Transfer Objects for webhook request/response serialization.

pub mod command;
pub mod health;
pub mod update;

pub use command::Command;
pub use update::{Update, WebhookReply};
