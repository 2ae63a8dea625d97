//! Application layer services implementing business logic.
//!
//! Orchestrates domain operations by coordinating the ledger repository and
//! the provider gateway behind a clean API for the webhook handlers.
//!
//! # Available Services
//!
//! - [`services::rewrite_service::RewriteService`] - the link-conversion pipeline
//! - [`services::account_service::AccountService`] - credential storage and link history
//! - [`services::stats_service::StatsService`] - provider-side click statistics

pub mod services;
