//! In-memory implementation of the user ledger repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::UserRecord;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// A ledger backed by a process-local map.
///
/// Used by tests and local development runs where a Postgres instance is not
/// worth the trouble. The whole map sits behind one `RwLock`, which gives the
/// same per-record atomicity the single-statement SQL upserts do.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn set_credential(&self, user_id: &str, credential: &str) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        records
            .entry(user_id.to_string())
            .or_insert_with(|| UserRecord::new(user_id))
            .credential = Some(credential.to_string());
        Ok(())
    }

    async fn append_link(&self, user_id: &str, short_url: &str) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        records
            .entry(user_id.to_string())
            .or_insert_with(|| UserRecord::new(user_id))
            .shortened_links
            .push(short_url.to_string());
        Ok(())
    }

    async fn list_links(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        Ok(self
            .records
            .read()
            .await
            .get(user_id)
            .map(|r| r.shortened_links.clone())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
