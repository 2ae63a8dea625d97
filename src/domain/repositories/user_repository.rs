//! Repository trait for per-user ledger data access.

use crate::domain::entities::UserRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the per-user link ledger.
///
/// One record per user holds the stored provider credential and the ordered
/// history of successfully shortened links. All mutations are read-modify-write
/// at the granularity of a single user record; implementations must make the
/// append and the credential upsert atomic so concurrent requests from the
/// same user cannot clobber each other.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUserRepository`] - in-process map for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up a user record by its opaque chat identity.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserRecord))` if the user has interacted before
    /// - `Ok(None)` if no record exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, AppError>;

    /// Stores a provider credential for the user (upsert).
    ///
    /// Creates the record when absent, otherwise overwrites the stored key.
    /// Callers are expected to have validated the candidate against the
    /// provider first; this method persists unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn set_credential(&self, user_id: &str, credential: &str) -> Result<(), AppError>;

    /// Appends one shortened link to the user's history.
    ///
    /// Duplicates are allowed and preserved in insertion order. Creates the
    /// record when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn append_link(&self, user_id: &str, short_url: &str) -> Result<(), AppError>;

    /// Returns the user's shortened links, oldest first.
    ///
    /// An unknown user yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_links(&self, user_id: &str) -> Result<Vec<String>, AppError>;

    /// Storage connectivity probe for the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the backing store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
