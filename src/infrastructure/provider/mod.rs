//! Shortening-provider gateway implementations.

pub mod http_client;
pub mod http_shortener;

pub use http_shortener::HttpShortenerGateway;
