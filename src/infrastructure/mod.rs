//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer:
//!
//! - [`persistence`] - PostgreSQL and in-memory ledger repositories
//! - [`provider`] - HTTP gateway to the shortening provider

pub mod persistence;
pub mod provider;
