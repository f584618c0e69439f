//! SQLite transaction repository implementation

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::models::TransactionRow;
use crate::repo::{CreateTransaction, TransactionRepository};

/// SQLite transaction repository
#[derive(Clone)]
pub struct SqliteTransactionRepository {
    pool: SqlitePool,
}

impl SqliteTransactionRepository {
    /// Create a new transaction repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for SqliteTransactionRepository {
    async fn list(&self) -> DbResult<Vec<TransactionRow>> {
        let transactions = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, client_id, amount, description FROM transactions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    async fn create(&self, tx: CreateTransaction) -> DbResult<TransactionRow> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (client_id, amount, description)
            VALUES (?, ?, ?)
            RETURNING id, client_id, amount, description
            "#,
        )
        .bind(tx.client_id)
        .bind(tx.amount)
        .bind(&tx.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
