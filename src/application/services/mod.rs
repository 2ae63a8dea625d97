//! Business logic services for the application layer.

pub mod account_service;
pub mod rewrite_service;
pub mod stats_service;

pub use account_service::AccountService;
pub use rewrite_service::RewriteService;
pub use stats_service::StatsService;
