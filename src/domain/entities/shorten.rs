//! Shortening request/result types shared across the pipeline.

use thiserror::Error;

/// A single request to the external shortening provider.
///
/// The URL must be well-formed (scheme + host) before the gateway issues the
/// provider call; the gateway enforces this and reports [`ShortenError::InvalidUrl`]
/// otherwise. The alias is only set for the explicit `/shorten` command —
/// passive detection never passes one.
#[derive(Debug, Clone)]
pub struct ShortenRequest {
    pub url: String,
    pub alias: Option<String>,
    pub credential: String,
}

impl ShortenRequest {
    pub fn new(url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alias: None,
            credential: credential.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Why a URL could not be shortened.
///
/// Every variant is a recoverable, per-URL condition surfaced back to the
/// user as reply text; none aborts processing of the remaining URLs in the
/// same message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenError {
    #[error("the URL is malformed (expected http/https with a host)")]
    InvalidUrl,

    #[error("the URL matches a blacklisted domain")]
    Blacklisted,

    #[error("no API key linked for this user")]
    Unauthenticated,

    #[error("shortening provider rejected the request: {0}")]
    Provider(String),

    #[error("shortening provider did not respond in time")]
    Timeout,
}

/// Outcome of one shorten attempt: the shortened URL, or the failure reason.
pub type ShortenResult = Result<String, ShortenError>;

/// Click statistics for a shortened link, as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStats {
    pub clicks: u64,
    pub revenue: f64,
    pub currency: Option<String>,
}

/// Result of a credential-set attempt.
///
/// `Rejected` carries the trial-shorten failure; the previously stored
/// credential (if any) is left untouched in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOutcome {
    Saved,
    Rejected(ShortenError),
}

/// Result of rewriting one inbound message.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub original: String,
    pub rewritten: String,
    /// One entry per distinct URL, in first-occurrence order.
    pub results: Vec<(String, ShortenResult)>,
    pub successes: usize,
}

impl RewriteOutcome {
    /// Outcome for a message containing no URLs: text unchanged, nothing recorded.
    pub fn unchanged(text: &str) -> Self {
        Self {
            original: text.to_string(),
            rewritten: text.to_string(),
            results: Vec::new(),
            successes: 0,
        }
    }

    /// Returns true when every processed URL failed with the given reason.
    pub fn all_failed_with(&self, reason: &ShortenError) -> bool {
        !self.results.is_empty()
            && self
                .results
                .iter()
                .all(|(_, r)| r.as_ref().err() == Some(reason))
    }
}
