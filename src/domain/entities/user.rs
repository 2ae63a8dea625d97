//! User record: per-user credential and link history.

/// Persisted state for a single chat user.
///
/// Created on first interaction. The link history is append-only and keeps
/// duplicates in insertion order (it mirrors real usage, not a set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub credential: Option<String>,
    pub shortened_links: Vec<String>,
}

impl UserRecord {
    /// Creates a fresh record with no credential and no history.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            credential: None,
            shortened_links: Vec::new(),
        }
    }

    /// Returns true when the user has a stored provider API key.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}
