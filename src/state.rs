//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AccountService, RewriteService, StatsService};
use crate::domain::gateway::ShortenerGateway;
use crate::domain::repositories::UserRepository;
use crate::utils::Blacklist;

/// Request-scoped context handed to every handler.
///
/// Holds the three services plus the webhook path secret. Built once at
/// startup from a ledger repository and a provider gateway; nothing in here
/// is process-global, which keeps tests free to assemble their own state
/// from in-memory parts.
#[derive(Clone)]
pub struct AppState {
    pub rewrite_service: Arc<RewriteService>,
    pub account_service: Arc<AccountService>,
    pub stats_service: Arc<StatsService>,
    pub webhook_token: String,
}

impl AppState {
    /// Wires the services from their collaborators.
    pub fn new(
        users: Arc<dyn UserRepository>,
        gateway: Arc<dyn ShortenerGateway>,
        blacklist: Blacklist,
        webhook_token: String,
    ) -> Self {
        Self {
            rewrite_service: Arc::new(RewriteService::new(
                users.clone(),
                gateway.clone(),
                blacklist,
            )),
            account_service: Arc::new(AccountService::new(users.clone(), gateway.clone())),
            stats_service: Arc::new(StatsService::new(users, gateway)),
            webhook_token,
        }
    }
}
