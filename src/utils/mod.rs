//! Shared pure helpers: URL detection and blacklist filtering.

pub mod blacklist;
pub mod url_extractor;

pub use blacklist::Blacklist;
pub use url_extractor::extract_urls;
