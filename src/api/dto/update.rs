//! DTOs for the inbound webhook update and the outbound reply.

use serde::{Deserialize, Serialize};

/// A Telegram-style webhook update.
///
/// Only the fields the relay cares about are modeled; everything else in the
/// payload is ignored. Every field is optional because the platform delivers
/// plenty of update kinds that carry no text message at all.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: Option<i64>,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub from: Option<Sender>,
    pub chat: Option<Chat>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Sender {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Extracts `(chat_id, user_id, text)` when this update is a text message.
    ///
    /// Returns `None` for edits, stickers, joins and other non-text updates —
    /// those are acknowledged and dropped.
    pub fn message_parts(&self) -> Option<(i64, String, &str)> {
        let message = self.message.as_ref()?;
        let chat_id = message.chat.as_ref()?.id;
        let user_id = message.from.as_ref()?.id.to_string();
        let text = message.text.as_deref()?;
        Some((chat_id, user_id, text))
    }
}

/// Reply delivered as the webhook response body.
///
/// Telegram executes the embedded method directly, so no outbound bot API
/// call is needed to answer a message.
#[derive(Debug, Serialize)]
pub struct WebhookReply {
    pub method: &'static str,
    pub chat_id: i64,
    pub text: String,
}

impl WebhookReply {
    pub fn send_message(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            method: "sendMessage",
            chat_id,
            text: text.into(),
        }
    }
}
