//! Handler for the inbound chat webhook.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::command::{self, Command};
use crate::api::dto::{Update, WebhookReply};
use crate::domain::entities::{CredentialOutcome, ShortenError};
use crate::error::AppError;
use crate::state::AppState;

/// Processes one webhook delivery and answers in the response body.
///
/// # Endpoint
///
/// `POST /webhook/{token}` — `{token}` must match the configured bot token;
/// the secret-in-path scheme is the chat platform's own webhook convention.
///
/// # Behavior
///
/// Text messages are routed by [`command::parse`]; everything else (stickers,
/// edits, joins) is acknowledged with an empty body so the platform does not
/// redeliver it. The reply, when there is one, is returned as a
/// `sendMessage` payload in the response — no outbound bot API call is made.
///
/// # Errors
///
/// Returns `401 Unauthorized` for a wrong path token and `500` on storage
/// errors. Per-URL shortening failures are reported in the reply text, never
/// as HTTP errors.
pub async fn webhook_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(update): Json<Update>,
) -> Result<Response, AppError> {
    if token != state.webhook_token {
        return Err(AppError::unauthorized(
            "Unknown webhook token",
            json!({"reason": "path token does not match the configured bot token"}),
        ));
    }

    let Some((chat_id, user_id, text)) = update.message_parts() else {
        tracing::debug!(update_id = ?update.update_id, "ignoring non-text update");
        return Ok(StatusCode::OK.into_response());
    };

    match dispatch(&state, &user_id, text).await? {
        Some(reply) => Ok(Json(WebhookReply::send_message(chat_id, reply)).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// Routes one text message to the right core operation and renders the reply.
async fn dispatch(
    state: &AppState,
    user_id: &str,
    text: &str,
) -> Result<Option<String>, AppError> {
    let reply = match command::parse(text) {
        Command::Start => Some(start_text()),
        Command::Help => Some(help_text()),

        Command::Api(None) => Some(
            "Usage: /api <key>\nGet your key from the provider dashboard first.".to_string(),
        ),
        Command::Api(Some(key)) => {
            let reply = match state.account_service.set_credential(user_id, key).await? {
                CredentialOutcome::Saved => {
                    "API key linked. Send me any message with links and I'll convert them."
                        .to_string()
                }
                CredentialOutcome::Rejected(reason) => format!(
                    "That key didn't work: {reason}. Your previously linked key (if any) is unchanged."
                ),
            };
            Some(reply)
        }

        Command::Shorten { url: None, .. } => {
            Some("Usage: /shorten <url> [alias]".to_string())
        }
        Command::Shorten {
            url: Some(url),
            alias,
        } => {
            let reply = match state.rewrite_service.shorten_one(user_id, url, alias).await? {
                Ok(short) => short,
                Err(reason) => describe_failure(url, &reason),
            };
            Some(reply)
        }

        Command::ViewLinks => {
            let links = state.account_service.list_links(user_id).await?;
            let reply = if links.is_empty() {
                "You haven't shortened any links yet.".to_string()
            } else {
                links.join("\n")
            };
            Some(reply)
        }

        Command::Stats(None) => Some("Usage: /stats <shortened url>".to_string()),
        Command::Stats(Some(url)) => {
            let reply = match state.stats_service.stats(user_id, url).await? {
                Ok(stats) => format!(
                    "Clicks: {} | Revenue: {:.2} {}",
                    stats.clicks,
                    stats.revenue,
                    stats.currency.as_deref().unwrap_or("")
                )
                .trim_end()
                .to_string(),
                Err(reason) => describe_failure(url, &reason),
            };
            Some(reply)
        }

        Command::Unknown(cmd) => Some(format!("Unknown command {cmd}. Try /help.")),

        Command::Message(text) => {
            let outcome = state.rewrite_service.rewrite(user_id, text).await?;
            if outcome.results.is_empty() {
                // Nothing link-shaped in the message; stay silent.
                None
            } else if outcome.all_failed_with(&ShortenError::Unauthenticated) {
                Some(
                    "You haven't linked an API key yet. Send /api <key> to start converting links."
                        .to_string(),
                )
            } else {
                Some(outcome.rewritten)
            }
        }
    };

    Ok(reply)
}

fn describe_failure(url: &str, reason: &ShortenError) -> String {
    format!("Couldn't shorten {url}: {reason}")
}

fn start_text() -> String {
    [
        "I convert links straight through your shortener account.",
        "",
        "1. Open your provider dashboard and copy your API key",
        "2. Send /api <key> to link it",
        "3. Then just send me any message containing links",
        "",
        "Hit /help for the full command list.",
    ]
    .join("\n")
}

fn help_text() -> String {
    [
        "/api <key> - link your shortener API key",
        "/shorten <url> [alias] - shorten one URL, optional custom alias",
        "/view_links - list the links you've shortened",
        "/stats <url> - clicks and revenue for a shortened URL",
        "",
        "Any other message is scanned for links and converted in place.",
    ]
    .join("\n")
}
