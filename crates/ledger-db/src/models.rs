//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use sqlx::FromRow;

use ledger_types::{
    Client, ClientId, Enrollment, EnrollmentId, Subscription, SubscriptionId, Transaction,
    TransactionId,
};

use crate::DbError;

/// Client row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub email: String,
    pub phone: Option<String>,
}

/// Subscription plan row from the database
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionRow {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

/// Client/subscription link row from the database
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentRow {
    pub id: i64,
    pub client_id: i64,
    pub subscription_id: i64,
    pub status: String,
}

/// Transaction row from the database
#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    pub id: i64,
    pub client_id: i64,
    pub amount: i64,
    pub description: String,
}

// Conversion implementations from Row types to ledger-types domain types
impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: ClientId(row.id),
            name: row.name,
            age: row.age,
            email: row.email,
            phone: row.phone,
        }
    }
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: SubscriptionId(row.id),
            name: row.name,
            price: row.price,
        }
    }
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = DbError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| DbError::InvalidData(format!("enrollment {}: {e}", row.id)))?;

        Ok(Self {
            id: EnrollmentId(row.id),
            client_id: ClientId(row.client_id),
            subscription_id: SubscriptionId(row.subscription_id),
            status,
        })
    }
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: TransactionId(row.id),
            client_id: ClientId(row.client_id),
            amount: row.amount,
            description: row.description,
        }
    }
}
