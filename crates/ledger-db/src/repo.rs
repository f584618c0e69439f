//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::models::*;

/// Client repository trait
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find a client by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<ClientRow>>;

    /// Find a client by exact email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<ClientRow>>;

    /// List all clients ordered by ID
    async fn list(&self) -> DbResult<Vec<ClientRow>>;

    /// Create a new client
    async fn create(&self, client: ClientFields) -> DbResult<ClientRow>;

    /// Overwrite every field of a client. Returns `None` if it does not exist.
    async fn update(&self, id: i64, client: ClientFields) -> DbResult<Option<ClientRow>>;

    /// Delete a client. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> DbResult<bool>;
}

/// Client column values for inserts and updates
#[derive(Debug, Clone)]
pub struct ClientFields {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub phone: Option<String>,
}

/// Subscription plan repository trait
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find a subscription plan by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<SubscriptionRow>>;

    /// List all subscription plans ordered by ID
    async fn list(&self) -> DbResult<Vec<SubscriptionRow>>;

    /// Create a new subscription plan
    async fn create(&self, sub: CreateSubscription) -> DbResult<SubscriptionRow>;
}

/// Create subscription input
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub name: String,
    pub price: i64,
}

/// Enrollment (client/subscription link) repository trait
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert a new enrollment row
    async fn create(&self, enrollment: CreateEnrollment) -> DbResult<EnrollmentRow>;

    /// Find the enrollments of a client, optionally restricted to one status
    async fn find_by_client_id(
        &self,
        client_id: i64,
        status: Option<&str>,
    ) -> DbResult<Vec<EnrollmentRow>>;
}

/// Create enrollment input
#[derive(Debug, Clone)]
pub struct CreateEnrollment {
    pub client_id: i64,
    pub subscription_id: i64,
    pub status: String,
}

/// Transaction repository trait
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// List all transactions ordered by ID
    async fn list(&self) -> DbResult<Vec<TransactionRow>>;

    /// Create a new transaction
    async fn create(&self, tx: CreateTransaction) -> DbResult<TransactionRow>;
}

/// Create transaction input
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    pub client_id: i64,
    pub amount: i64,
    pub description: String,
}
