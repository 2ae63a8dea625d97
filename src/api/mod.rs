//! HTTP layer translating webhook deliveries into core operations.
//!
//! # Modules
//!
//! - [`dto`] - inbound update / outbound reply shapes and command parsing
//! - [`handlers`] - webhook and health handlers
//! - [`middleware`] - request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
