//! Repository implementations for the user ledger.

pub mod memory_user_repository;
pub mod pg_user_repository;

pub use memory_user_repository::InMemoryUserRepository;
pub use pg_user_repository::PgUserRepository;
