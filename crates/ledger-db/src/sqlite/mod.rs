//! SQLite repository implementations

mod client;
mod enrollment;
mod subscription;
mod transaction;

pub use client::SqliteClientRepository;
pub use enrollment::SqliteEnrollmentRepository;
pub use subscription::SqliteSubscriptionRepository;
pub use transaction::SqliteTransactionRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub clients: SqliteClientRepository,
    pub subscriptions: SqliteSubscriptionRepository,
    pub enrollments: SqliteEnrollmentRepository,
    pub transactions: SqliteTransactionRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            clients: SqliteClientRepository::new(pool.clone()),
            subscriptions: SqliteSubscriptionRepository::new(pool.clone()),
            enrollments: SqliteEnrollmentRepository::new(pool.clone()),
            transactions: SqliteTransactionRepository::new(pool),
        }
    }
}
