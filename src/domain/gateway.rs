//! Gateway trait for the external shortening provider.

use crate::domain::entities::{LinkStats, ShortenError, ShortenRequest, ShortenResult};
use async_trait::async_trait;

/// The single seam to the external shortening provider.
///
/// All provider-specific request building and response parsing lives behind
/// this trait. Implementations must never let a raw transport error escape:
/// every failure mode is folded into [`ShortenError`] so one bad URL can
/// never take down message handling.
///
/// # Implementations
///
/// - [`crate::infrastructure::provider::HttpShortenerGateway`] - HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerGateway: Send + Sync {
    /// Shortens a single URL with the given credential and optional alias.
    ///
    /// Classification contract:
    ///
    /// - malformed URL (missing scheme or host) → `Err(InvalidUrl)`, no call issued
    /// - transport timeout → `Err(Timeout)`
    /// - transport or HTTP-level error → `Err(Provider)`
    /// - parsed response with success indicator and shortened URL → `Ok(url)`
    /// - parsed response indicating failure, or required field missing → `Err(Provider)`
    async fn shorten(&self, request: &ShortenRequest) -> ShortenResult;

    /// Fetches provider-side click statistics for an already-shortened URL.
    ///
    /// Uses the same error classification as [`Self::shorten`].
    async fn stats(&self, url: &str, credential: &str) -> Result<LinkStats, ShortenError>;
}
