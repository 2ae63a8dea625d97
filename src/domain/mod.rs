//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - core business data structures
//! - [`repositories`] - data access trait definitions (the link ledger)
//! - [`gateway`] - the external shortening-provider seam
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; business logic lives in [`crate::application::services`].

pub mod entities;
pub mod gateway;
pub mod repositories;

pub use gateway::ShortenerGateway;

#[cfg(test)]
pub use gateway::MockShortenerGateway;
