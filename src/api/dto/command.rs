//! Parsing of slash commands out of inbound message text.

/// A routed inbound message.
///
/// Anything that does not start with `/` is a plain [`Command::Message`] and
/// goes through passive link rewriting. Missing arguments are surfaced as
/// `None` so handlers can answer with usage text.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    Help,
    Api(Option<&'a str>),
    Shorten {
        url: Option<&'a str>,
        alias: Option<&'a str>,
    },
    ViewLinks,
    Stats(Option<&'a str>),
    Unknown(&'a str),
    Message(&'a str),
}

/// Parses one inbound message into a [`Command`].
///
/// Handles the `/cmd@BotName` form Telegram uses in group chats.
pub fn parse(text: &str) -> Command<'_> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Command::Message(text);
    }

    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or("/");
    let name = head
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or_default();

    match name {
        "start" => Command::Start,
        "help" | "features" => Command::Help,
        "api" => Command::Api(parts.next()),
        "shorten" => Command::Shorten {
            url: parts.next(),
            alias: parts.next(),
        },
        "view_links" | "my_links" => Command::ViewLinks,
        "stats" => Command::Stats(parts.next()),
        _ => Command::Unknown(head),
    }
}
