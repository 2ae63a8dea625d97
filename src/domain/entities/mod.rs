//! Core domain entities representing the business data model.
//!
//! Plain data structures with no infrastructure concerns:
//!
//! - [`UserRecord`] - per-user credential and shortened-link history
//! - [`ShortenRequest`] / [`ShortenResult`] - one shortening attempt and its outcome
//! - [`RewriteOutcome`] - the result of rewriting one inbound message
//! - [`LinkStats`] - provider-reported click statistics

pub mod shorten;
pub mod user;

pub use shorten::{
    CredentialOutcome, LinkStats, RewriteOutcome, ShortenError, ShortenRequest, ShortenResult,
};
pub use user::UserRecord;
