//! Mock repositories for testing

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use ledger_db::{
    ClientFields, ClientRepository, ClientRow, CreateEnrollment, CreateSubscription,
    CreateTransaction, DbError, DbResult, EnrollmentRepository, EnrollmentRow,
    SubscriptionRepository, SubscriptionRow, TransactionRepository, TransactionRow,
};

fn sorted<T: Clone>(map: &DashMap<i64, T>) -> Vec<T> {
    let mut entries: Vec<(i64, T)> = map.iter().map(|r| (*r.key(), r.value().clone())).collect();
    entries.sort_by_key(|(id, _)| *id);
    entries.into_iter().map(|(_, v)| v).collect()
}

/// In-memory client repository for testing.
///
/// Enforces email uniqueness on writes the way the store's UNIQUE
/// constraint does.
#[derive(Default, Clone)]
pub struct MockClientRepository {
    clients: Arc<DashMap<i64, ClientRow>>,
    next_id: Arc<AtomicI64>,
    blind_email_lookup: Arc<AtomicBool>,
}

impl MockClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find_by_email` always miss, simulating a concurrent insert
    /// landing between the pre-check and the write
    #[allow(dead_code)]
    pub fn with_blind_email_lookup(self) -> Self {
        self.blind_email_lookup.store(true, Ordering::SeqCst);
        self
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.clients
            .iter()
            .any(|r| r.email == email && Some(r.id) != except)
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<ClientRow>> {
        Ok(self.clients.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<ClientRow>> {
        if self.blind_email_lookup.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .clients
            .iter()
            .find(|r| r.email == email)
            .map(|r| r.value().clone()))
    }

    async fn list(&self) -> DbResult<Vec<ClientRow>> {
        Ok(sorted(&self.clients))
    }

    async fn create(&self, client: ClientFields) -> DbResult<ClientRow> {
        if self.email_taken(&client.email, None) {
            return Err(DbError::UniqueViolation(
                "UNIQUE constraint failed: clients.email".to_string(),
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = ClientRow {
            id,
            name: client.name,
            age: client.age,
            email: client.email,
            phone: client.phone,
        };
        self.clients.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, client: ClientFields) -> DbResult<Option<ClientRow>> {
        if self.email_taken(&client.email, Some(id)) {
            return Err(DbError::UniqueViolation(
                "UNIQUE constraint failed: clients.email".to_string(),
            ));
        }
        Ok(self.clients.get_mut(&id).map(|mut row| {
            row.name = client.name;
            row.age = client.age;
            row.email = client.email;
            row.phone = client.phone;
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        Ok(self.clients.remove(&id).is_some())
    }
}

/// In-memory subscription plan repository for testing
#[derive(Default, Clone)]
pub struct MockSubscriptionRepository {
    subscriptions: Arc<DashMap<i64, SubscriptionRow>>,
    next_id: Arc<AtomicI64>,
}

impl MockSubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<SubscriptionRow>> {
        Ok(self.subscriptions.get(&id).map(|r| r.value().clone()))
    }

    async fn list(&self) -> DbResult<Vec<SubscriptionRow>> {
        Ok(sorted(&self.subscriptions))
    }

    async fn create(&self, sub: CreateSubscription) -> DbResult<SubscriptionRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = SubscriptionRow {
            id,
            name: sub.name,
            price: sub.price,
        };
        self.subscriptions.insert(id, row.clone());
        Ok(row)
    }
}

/// In-memory enrollment repository for testing
#[derive(Default, Clone)]
pub struct MockEnrollmentRepository {
    enrollments: Arc<DashMap<i64, EnrollmentRow>>,
    next_id: Arc<AtomicI64>,
}

impl MockEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.enrollments.len()
    }
}

#[async_trait]
impl EnrollmentRepository for MockEnrollmentRepository {
    async fn create(&self, enrollment: CreateEnrollment) -> DbResult<EnrollmentRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = EnrollmentRow {
            id,
            client_id: enrollment.client_id,
            subscription_id: enrollment.subscription_id,
            status: enrollment.status,
        };
        self.enrollments.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_client_id(
        &self,
        client_id: i64,
        status: Option<&str>,
    ) -> DbResult<Vec<EnrollmentRow>> {
        Ok(sorted(&self.enrollments)
            .into_iter()
            .filter(|row| row.client_id == client_id)
            .filter(|row| status.map_or(true, |s| row.status == s))
            .collect())
    }
}

/// In-memory transaction repository for testing
#[derive(Default, Clone)]
pub struct MockTransactionRepository {
    transactions: Arc<DashMap<i64, TransactionRow>>,
    next_id: Arc<AtomicI64>,
}

impl MockTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn list(&self) -> DbResult<Vec<TransactionRow>> {
        Ok(sorted(&self.transactions))
    }

    async fn create(&self, tx: CreateTransaction) -> DbResult<TransactionRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = TransactionRow {
            id,
            client_id: tx.client_id,
            amount: tx.amount,
            description: tx.description,
        };
        self.transactions.insert(id, row.clone());
        Ok(row)
    }
}
