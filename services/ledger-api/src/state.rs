//! Application state for the Ledger API service.

use ledger_core::{ClientService, SubscriptionService, TransactionService};
use ledger_db::sqlite::{
    SqliteClientRepository, SqliteEnrollmentRepository, SqliteSubscriptionRepository,
    SqliteTransactionRepository,
};
use ledger_db::{DbPool, Repositories};
use std::sync::Arc;

use crate::config::Config;

pub type Clients =
    ClientService<SqliteClientRepository, SqliteSubscriptionRepository, SqliteEnrollmentRepository>;
pub type Subscriptions = SubscriptionService<SqliteSubscriptionRepository>;
pub type Transactions = TransactionService<SqliteTransactionRepository, SqliteClientRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Client records and enrollments
    pub clients: Arc<Clients>,
    /// Subscription plans
    pub subscriptions: Arc<Subscriptions>,
    /// Transactions and invoices
    pub transactions: Arc<Transactions>,
    /// Database pool (readiness probe)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire repositories and services over `pool`
    pub fn new(pool: DbPool, config: Config) -> Self {
        let repos = Repositories::new(pool.clone());
        let clients = Arc::new(repos.clients);
        let subscriptions = Arc::new(repos.subscriptions);

        Self {
            clients: Arc::new(ClientService::new(
                clients.clone(),
                subscriptions.clone(),
                Arc::new(repos.enrollments),
                config.ledger.clone(),
            )),
            subscriptions: Arc::new(SubscriptionService::new(subscriptions)),
            transactions: Arc::new(TransactionService::new(
                Arc::new(repos.transactions),
                clients,
            )),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
