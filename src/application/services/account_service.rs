//! Credential management and link-history service.

use std::sync::Arc;

use crate::domain::entities::{CredentialOutcome, ShortenRequest};
use crate::domain::gateway::ShortenerGateway;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// A benign URL shortened once to prove a candidate key actually works.
const VALIDATION_URL: &str = "https://example.com/";

/// Service for per-user credential storage and the "my links" history.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    gateway: Arc<dyn ShortenerGateway>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(users: Arc<dyn UserRepository>, gateway: Arc<dyn ShortenerGateway>) -> Self {
        Self { users, gateway }
    }

    /// Resolves the stored provider credential for a user. Read-only.
    ///
    /// Returns `None` when no record exists or no key is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn credential(&self, user_id: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .users
            .find(user_id)
            .await?
            .and_then(|user| user.credential))
    }

    /// Validates and stores a candidate provider key for a user.
    ///
    /// The candidate is first exercised against the provider with a trial
    /// shorten of a fixed benign URL. Only on provider success is the key
    /// persisted (upsert). On any trial failure the previously stored
    /// credential, if any, stays untouched and the failure is reported in
    /// [`CredentialOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn set_credential(
        &self,
        user_id: &str,
        candidate: &str,
    ) -> Result<CredentialOutcome, AppError> {
        let trial = ShortenRequest::new(VALIDATION_URL, candidate);

        match self.gateway.shorten(&trial).await {
            Ok(_) => {
                self.users.set_credential(user_id, candidate).await?;
                tracing::info!(user = %user_id, "credential validated and stored");
                Ok(CredentialOutcome::Saved)
            }
            Err(reason) => {
                tracing::warn!(user = %user_id, %reason, "credential rejected by provider");
                Ok(CredentialOutcome::Rejected(reason))
            }
        }
    }

    /// Returns the user's shortened-link history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_links(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        self.users.list_links(user_id).await
    }

    /// Storage probe used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the ledger store is unreachable.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.users.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockShortenerGateway;
    use crate::domain::entities::ShortenError;
    use crate::domain::repositories::MockUserRepository;

    #[tokio::test]
    async fn test_set_credential_persists_on_trial_success() {
        let mut users = MockUserRepository::new();
        users
            .expect_set_credential()
            .withf(|user, key| user == "42" && key == "good-key")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .withf(|req| req.url == VALIDATION_URL && req.credential == "good-key")
            .times(1)
            .returning(|_| Ok("https://short.ly/trial".to_string()));

        let svc = AccountService::new(Arc::new(users), Arc::new(gateway));

        let outcome = svc.set_credential("42", "good-key").await.unwrap();
        assert_eq!(outcome, CredentialOutcome::Saved);
    }

    #[tokio::test]
    async fn test_set_credential_rejected_leaves_store_untouched() {
        // Scenario C: the trial call fails, nothing is written.
        let users = MockUserRepository::new();

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .times(1)
            .returning(|_| Err(ShortenError::Provider("invalid key".to_string())));

        let svc = AccountService::new(Arc::new(users), Arc::new(gateway));

        let outcome = svc.set_credential("42", "bad-key").await.unwrap();
        assert_eq!(
            outcome,
            CredentialOutcome::Rejected(ShortenError::Provider("invalid key".to_string()))
        );
    }

    #[tokio::test]
    async fn test_set_credential_reports_timeout() {
        let users = MockUserRepository::new();

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .times(1)
            .returning(|_| Err(ShortenError::Timeout));

        let svc = AccountService::new(Arc::new(users), Arc::new(gateway));

        let outcome = svc.set_credential("42", "slow-key").await.unwrap();
        assert_eq!(outcome, CredentialOutcome::Rejected(ShortenError::Timeout));
    }

    #[tokio::test]
    async fn test_credential_lookup_is_read_only() {
        let mut users = MockUserRepository::new();
        users.expect_find().times(1).returning(|_| Ok(None));

        let svc = AccountService::new(Arc::new(users), Arc::new(MockShortenerGateway::new()));

        assert_eq!(svc.credential("42").await.unwrap(), None);
    }
}
