//! Shared reqwest client construction for provider calls.

use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for all provider traffic.
///
/// `timeout_secs` bounds the whole request; connects are capped separately so
/// a black-holed provider fails fast.
///
/// # Errors
///
/// Returns the builder error when the TLS backend cannot be initialized. A
/// client without the configured timeout is never handed out.
pub fn build_provider_client(timeout_secs: u64) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}
