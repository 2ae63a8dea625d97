//! Message rewriting service: the link-conversion pipeline.

use std::sync::Arc;

use crate::domain::entities::{RewriteOutcome, ShortenError, ShortenRequest, ShortenResult};
use crate::domain::gateway::ShortenerGateway;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::{Blacklist, extract_urls};

/// Orchestrates extraction → filtering → shortening → substitution for one
/// inbound message.
///
/// The credential is resolved once per message, before any provider call; the
/// ledger is written after each successful call. No user-record lock is held
/// while a provider call is in flight.
pub struct RewriteService {
    users: Arc<dyn UserRepository>,
    gateway: Arc<dyn ShortenerGateway>,
    blacklist: Blacklist,
}

impl RewriteService {
    /// Creates a new rewrite service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        gateway: Arc<dyn ShortenerGateway>,
        blacklist: Blacklist,
    ) -> Self {
        Self {
            users,
            gateway,
            blacklist,
        }
    }

    /// Rewrites every URL in `text` through the shortening provider.
    ///
    /// # Algorithm
    ///
    /// 1. Extract URLs; none found → text returned unchanged, no provider calls.
    /// 2. Resolve the user's credential once. Unauthenticated → one
    ///    `Unauthenticated` failure per extracted URL, text untouched (no
    ///    silent fallback to a shared key).
    /// 3. For each distinct URL in first-occurrence order: blacklist check,
    ///    then one gateway call. Repeated identical URLs share the first
    ///    result.
    /// 4. Every success replaces all occurrences of that exact URL substring.
    ///    Substitution runs longest URL first, so a URL that is a prefix of
    ///    another never rewrites inside the longer occurrence. Failures leave
    ///    the original in place and never abort the rest of the batch.
    /// 5. A message whose single distinct URL succeeded collapses to just the
    ///    shortened URL (legacy terse reply).
    /// 6. Successes are appended to the user's ledger; failures are not
    ///    persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only on ledger/storage failures;
    /// per-URL provider failures are reported inside the outcome.
    pub async fn rewrite(&self, user_id: &str, text: &str) -> Result<RewriteOutcome, AppError> {
        let found = extract_urls(text);
        if found.is_empty() {
            return Ok(RewriteOutcome::unchanged(text));
        }

        let mut distinct: Vec<String> = Vec::new();
        for url in found {
            if !distinct.contains(&url) {
                distinct.push(url);
            }
        }

        let credential = self
            .users
            .find(user_id)
            .await?
            .and_then(|user| user.credential);

        let Some(credential) = credential else {
            let results = distinct
                .into_iter()
                .map(|url| (url, Err(ShortenError::Unauthenticated)))
                .collect();
            return Ok(RewriteOutcome {
                original: text.to_string(),
                rewritten: text.to_string(),
                results,
                successes: 0,
            });
        };

        let single_url = distinct.len() == 1;
        let mut results: Vec<(String, ShortenResult)> = Vec::with_capacity(distinct.len());
        let mut successes = 0;

        for url in distinct {
            let result = if self.blacklist.is_allowed(&url) {
                self.gateway
                    .shorten(&ShortenRequest::new(url.clone(), credential.clone()))
                    .await
            } else {
                tracing::debug!(url = %url, "rejected by blacklist");
                Err(ShortenError::Blacklisted)
            };

            if let Ok(short) = &result {
                successes += 1;
                self.users.append_link(user_id, short).await?;
            }

            results.push((url, result));
        }

        // Longest URL first: a URL that is a prefix of another must not
        // rewrite inside the longer URL's occurrence.
        let mut substitutions: Vec<(&str, &str)> = results
            .iter()
            .filter_map(|(url, result)| {
                result
                    .as_ref()
                    .ok()
                    .map(|short| (url.as_str(), short.as_str()))
            })
            .collect();
        substitutions.sort_by_key(|(url, _)| std::cmp::Reverse(url.len()));

        let mut rewritten = text.to_string();
        for (url, short) in substitutions {
            rewritten = rewritten.replace(url, short);
        }

        if single_url && successes == 1 {
            if let Some((_, Ok(short))) = results.first() {
                rewritten = short.clone();
            }
        }

        Ok(RewriteOutcome {
            original: text.to_string(),
            rewritten,
            results,
            successes,
        })
    }

    /// Shortens exactly one URL on behalf of the explicit `/shorten` command.
    ///
    /// Unlike passive detection this accepts an alias, bypasses extraction,
    /// and reports the single outcome directly. The success is appended to
    /// the user's ledger.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on ledger/storage failures.
    pub async fn shorten_one(
        &self,
        user_id: &str,
        url: &str,
        alias: Option<&str>,
    ) -> Result<ShortenResult, AppError> {
        let credential = self
            .users
            .find(user_id)
            .await?
            .and_then(|user| user.credential);

        let Some(credential) = credential else {
            return Ok(Err(ShortenError::Unauthenticated));
        };

        if !self.blacklist.is_allowed(url) {
            return Ok(Err(ShortenError::Blacklisted));
        }

        let mut request = ShortenRequest::new(url, credential);
        if let Some(alias) = alias {
            request = request.with_alias(alias);
        }

        let result = self.gateway.shorten(&request).await;

        if let Ok(short) = &result {
            self.users.append_link(user_id, short).await?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockShortenerGateway;
    use crate::domain::entities::UserRecord;
    use crate::domain::repositories::MockUserRepository;

    fn authenticated_user(user_id: &str, key: &str) -> UserRecord {
        UserRecord {
            user_id: user_id.to_string(),
            credential: Some(key.to_string()),
            shortened_links: vec![],
        }
    }

    fn service(
        users: MockUserRepository,
        gateway: MockShortenerGateway,
        blacklist: Blacklist,
    ) -> RewriteService {
        RewriteService::new(Arc::new(users), Arc::new(gateway), blacklist)
    }

    #[tokio::test]
    async fn test_message_without_urls_is_untouched() {
        // No expectations set: any repo or gateway call would panic.
        let svc = service(
            MockUserRepository::new(),
            MockShortenerGateway::new(),
            Blacklist::default(),
        );

        let outcome = svc.rewrite("42", "no links in here").await.unwrap();

        assert_eq!(outcome.rewritten, "no links in here");
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.successes, 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_user_gets_failure_per_url() {
        let mut users = MockUserRepository::new();
        users.expect_find().times(1).returning(|_| Ok(None));

        let svc = service(users, MockShortenerGateway::new(), Blacklist::default());

        let text = "see https://a.com/x and https://b.com/y";
        let outcome = svc.rewrite("42", text).await.unwrap();

        assert_eq!(outcome.rewritten, text);
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.all_failed_with(&ShortenError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_single_link_collapses_to_short_url() {
        // Scenario A: one URL, authenticated, empty blacklist.
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(authenticated_user("42", "key"))));
        users
            .expect_append_link()
            .withf(|user, short| user == "42" && short == "https://short.ly/abc")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://foo.com/x" && req.alias.is_none())
            .times(1)
            .returning(|_| Ok("https://short.ly/abc".to_string()));

        let svc = service(users, gateway, Blacklist::default());

        let outcome = svc.rewrite("42", "check https://foo.com/x").await.unwrap();

        assert_eq!(outcome.rewritten, "https://short.ly/abc");
        assert_eq!(outcome.successes, 1);
        assert_eq!(outcome.results.len(), 1);
    }

    #[tokio::test]
    async fn test_blacklisted_url_never_reaches_gateway() {
        // Scenario B: spam.com is blocked, foo.com succeeds.
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(authenticated_user("42", "key"))));
        users
            .expect_append_link()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://foo.com/z")
            .times(1)
            .returning(|_| Ok("https://short.ly/xyz".to_string()));

        let svc = service(
            users,
            gateway,
            Blacklist::new(vec!["spam.com".to_string()]),
        );

        let outcome = svc
            .rewrite("42", "https://spam.com/y and https://foo.com/z")
            .await
            .unwrap();

        assert_eq!(
            outcome.rewritten,
            "https://spam.com/y and https://short.ly/xyz"
        );
        assert_eq!(outcome.results[0].1, Err(ShortenError::Blacklisted));
        assert_eq!(
            outcome.results[1].1,
            Ok("https://short.ly/xyz".to_string())
        );
        assert_eq!(outcome.successes, 1);
    }

    #[tokio::test]
    async fn test_duplicate_urls_share_one_provider_call() {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(authenticated_user("42", "key"))));
        users
            .expect_append_link()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .times(1)
            .returning(|_| Ok("https://short.ly/dup".to_string()));

        let svc = service(users, gateway, Blacklist::default());

        let outcome = svc
            .rewrite("42", "https://a.com/x then again https://a.com/x")
            .await
            .unwrap();

        // One distinct URL that succeeded: terse reply collapse applies.
        assert_eq!(outcome.rewritten, "https://short.ly/dup");
        assert_eq!(outcome.results.len(), 1);
    }

    #[tokio::test]
    async fn test_one_failing_url_does_not_abort_the_rest() {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(authenticated_user("42", "key"))));
        users
            .expect_append_link()
            .withf(|_, short| short == "https://short.ly/ok")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://down.com/a")
            .times(1)
            .returning(|_| Err(ShortenError::Provider("boom".to_string())));
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://up.com/b")
            .times(1)
            .returning(|_| Ok("https://short.ly/ok".to_string()));

        let svc = service(users, gateway, Blacklist::default());

        let outcome = svc
            .rewrite("42", "https://down.com/a https://up.com/b")
            .await
            .unwrap();

        assert_eq!(outcome.rewritten, "https://down.com/a https://short.ly/ok");
        assert_eq!(outcome.successes, 1);
        assert!(matches!(
            outcome.results[0].1,
            Err(ShortenError::Provider(_))
        ));
    }

    #[tokio::test]
    async fn test_two_distinct_successes_keep_full_text() {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(authenticated_user("42", "key"))));
        users
            .expect_append_link()
            .times(2)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://a.com/1")
            .returning(|_| Ok("https://short.ly/a".to_string()));
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://b.com/2")
            .returning(|_| Ok("https://short.ly/b".to_string()));

        let svc = service(users, gateway, Blacklist::default());

        let outcome = svc
            .rewrite("42", "first https://a.com/1 second https://b.com/2")
            .await
            .unwrap();

        assert_eq!(
            outcome.rewritten,
            "first https://short.ly/a second https://short.ly/b"
        );
        assert_eq!(outcome.successes, 2);
    }

    #[tokio::test]
    async fn test_prefix_url_does_not_rewrite_inside_longer_url() {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(authenticated_user("42", "key"))));
        users
            .expect_append_link()
            .times(2)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://a.com")
            .times(1)
            .returning(|_| Ok("https://s.ly/1".to_string()));
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://a.com/x")
            .times(1)
            .returning(|_| Ok("https://s.ly/2".to_string()));

        let svc = service(users, gateway, Blacklist::default());

        let outcome = svc
            .rewrite("42", "https://a.com https://a.com/x")
            .await
            .unwrap();

        assert_eq!(outcome.rewritten, "https://s.ly/1 https://s.ly/2");
        assert_eq!(outcome.successes, 2);
    }

    #[tokio::test]
    async fn test_shorten_one_passes_alias() {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(authenticated_user("42", "key"))));
        users
            .expect_append_link()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut gateway = MockShortenerGateway::new();
        gateway
            .expect_shorten()
            .withf(|req| req.url == "https://foo.com/x" && req.alias.as_deref() == Some("promo"))
            .times(1)
            .returning(|_| Ok("https://short.ly/promo".to_string()));

        let svc = service(users, gateway, Blacklist::default());

        let result = svc
            .shorten_one("42", "https://foo.com/x", Some("promo"))
            .await
            .unwrap();

        assert_eq!(result, Ok("https://short.ly/promo".to_string()));
    }

    #[tokio::test]
    async fn test_shorten_one_unauthenticated() {
        let mut users = MockUserRepository::new();
        users.expect_find().times(1).returning(|_| Ok(None));

        let svc = service(users, MockShortenerGateway::new(), Blacklist::default());

        let result = svc
            .shorten_one("42", "https://foo.com/x", None)
            .await
            .unwrap();

        assert_eq!(result, Err(ShortenError::Unauthenticated));
    }
}
