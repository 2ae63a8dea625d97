//! PostgreSQL implementation of the user ledger repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::UserRecord;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// PostgreSQL repository for per-user credential and link history.
///
/// Every mutation is a single upsert statement, so concurrent requests from
/// the same user serialize on the row instead of racing a read-then-write.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, credential, shortened_links
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| UserRecord {
            user_id: r.get("user_id"),
            credential: r.get("credential"),
            shortened_links: r.get("shortened_links"),
        }))
    }

    async fn set_credential(&self, user_id: &str, credential: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, credential)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET credential = EXCLUDED.credential
            "#,
        )
        .bind(user_id)
        .bind(credential)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn append_link(&self, user_id: &str, short_url: &str) -> Result<(), AppError> {
        // Single statement keeps the append atomic per user row.
        sqlx::query(
            r#"
            INSERT INTO users (user_id, shortened_links)
            VALUES ($1, ARRAY[$2::text])
            ON CONFLICT (user_id)
            DO UPDATE SET shortened_links = array_append(users.shortened_links, $2::text)
            "#,
        )
        .bind(user_id)
        .bind(short_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_links(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let links: Option<Vec<String>> =
            sqlx::query_scalar("SELECT shortened_links FROM users WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(links.unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
