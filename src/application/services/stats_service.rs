//! Provider-side click statistics service.

use std::sync::Arc;

use crate::domain::entities::{LinkStats, ShortenError};
use crate::domain::gateway::ShortenerGateway;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for the `/stats <url>` command.
///
/// Statistics live on the provider side, so this resolves the user's
/// credential and delegates to the gateway's stats variant.
pub struct StatsService {
    users: Arc<dyn UserRepository>,
    gateway: Arc<dyn ShortenerGateway>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(users: Arc<dyn UserRepository>, gateway: Arc<dyn ShortenerGateway>) -> Self {
        Self { users, gateway }
    }

    /// Fetches click statistics for a shortened URL on behalf of a user.
    ///
    /// The inner result carries per-request provider failures
    /// (`Unauthenticated` when no key is stored).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn stats(
        &self,
        user_id: &str,
        url: &str,
    ) -> Result<Result<LinkStats, ShortenError>, AppError> {
        let credential = self
            .users
            .find(user_id)
            .await?
            .and_then(|user| user.credential);

        let Some(credential) = credential else {
            return Ok(Err(ShortenError::Unauthenticated));
        };

        Ok(self.gateway.stats(url, &credential).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockShortenerGateway;
    use crate::domain::entities::UserRecord;
    use crate::domain::repositories::MockUserRepository;

    #[tokio::test]
    async fn test_stats_requires_credential() {
        let mut users = MockUserRepository::new();
        users.expect_find().times(1).returning(|_| Ok(None));

        let svc = StatsService::new(Arc::new(users), Arc::new(MockShortenerGateway::new()));

        let result = svc.stats("42", "https://short.ly/abc").await.unwrap();
        assert_eq!(result, Err(ShortenError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_stats_passes_stored_credential() {
        let mut users = MockUserRepository::new();
        users.expect_find().times(1).returning(|_| {
            Ok(Some(UserRecord {
                user_id: "42".to_string(),
                credential: Some("key".to_string()),
                shortened_links: vec![],
            }))
        });

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_stats()
            .withf(|url, key| url == "https://short.ly/abc" && key == "key")
            .times(1)
            .returning(|_, _| {
                Ok(LinkStats {
                    clicks: 12,
                    revenue: 0.34,
                    currency: Some("USD".to_string()),
                })
            });

        let svc = StatsService::new(Arc::new(users), Arc::new(gateway));

        let stats = svc
            .stats("42", "https://short.ly/abc")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.clicks, 12);
    }
}
