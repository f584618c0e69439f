//! Transaction service and invoice construction

use std::sync::Arc;

use ledger_db::{ClientRepository, CreateTransaction, TransactionRepository};
use ledger_types::{Invoice, InvoiceSummary, NewTransaction, Transaction};
use tracing::{info, instrument};

use crate::validation;
use crate::LedgerError;

/// Transaction service
pub struct TransactionService<T, C>
where
    T: TransactionRepository,
    C: ClientRepository,
{
    transactions: Arc<T>,
    clients: Arc<C>,
}

impl<T, C> TransactionService<T, C>
where
    T: TransactionRepository,
    C: ClientRepository,
{
    /// Create a new transaction service
    pub fn new(transactions: Arc<T>, clients: Arc<C>) -> Self {
        Self {
            transactions,
            clients,
        }
    }

    /// Record a transaction for an existing client
    #[instrument(skip(self, tx), fields(client_id = %tx.client_id, amount = tx.amount))]
    pub async fn create(&self, tx: NewTransaction) -> Result<Transaction, LedgerError> {
        validation::validate_new_transaction(&tx)?;

        if self.clients.find_by_id(tx.client_id.0).await?.is_none() {
            return Err(LedgerError::ClientNotFound);
        }

        let row = self
            .transactions
            .create(CreateTransaction {
                client_id: tx.client_id.0,
                amount: tx.amount,
                description: tx.description,
            })
            .await?;

        let transaction = Transaction::from(row);
        info!(transaction_id = %transaction.id, "Transaction recorded");
        Ok(transaction)
    }

    /// List every transaction
    pub async fn list(&self) -> Result<Vec<Transaction>, LedgerError> {
        let rows = self.transactions.list().await?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    /// Build an invoice from caller-supplied data.
    ///
    /// Nothing is stored or checked against stored transactions; the total
    /// is the sum of the embedded lines.
    pub fn build_invoice(&self, invoice: Invoice) -> InvoiceSummary {
        InvoiceSummary::from(invoice)
    }
}
