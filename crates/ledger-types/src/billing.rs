//! Transaction and invoice types

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::{ClientId, ClientProfile};

/// Store-assigned transaction identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub i64);

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monetary event attributed to one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID
    pub id: TransactionId,
    /// Client the transaction belongs to
    pub client_id: ClientId,
    /// Amount in the smallest currency unit
    pub amount: i64,
    /// Free-form description
    pub description: String,
}

/// Transaction creation shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub client_id: ClientId,
    pub amount: i64,
    pub description: String,
}

/// Transaction line embedded in an invoice.
///
/// Lines are supplied by the caller and never checked against stored
/// transactions, so the id is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    #[serde(default)]
    pub id: Option<TransactionId>,
    pub client_id: ClientId,
    pub amount: i64,
    pub description: String,
}

/// Transient invoice aggregate. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    /// Snapshot of the billed client
    pub client: ClientProfile,
    #[serde(alias = "transaction")]
    pub transactions: Vec<InvoiceLine>,
    /// Caller-supplied amount, independent of the line total
    #[serde(alias = "ammount")]
    pub amount: i64,
    pub description: String,
    pub date: String,
}

impl Invoice {
    /// Sum of the embedded line amounts.
    ///
    /// Always recomputed; `amount` is not consulted.
    pub fn total_amount(&self) -> i64 {
        self.transactions
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.amount))
    }
}

/// Which keys an invoice was submitted with.
///
/// Older callers spell the line list `transaction` and the supplied amount
/// `ammount`. Each key is tracked on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvoiceSpelling {
    pub legacy_lines: bool,
    pub legacy_amount: bool,
}

impl InvoiceSpelling {
    pub fn lines_key(self) -> &'static str {
        if self.legacy_lines {
            "transaction"
        } else {
            "transactions"
        }
    }

    pub fn amount_key(self) -> &'static str {
        if self.legacy_amount {
            "ammount"
        } else {
            "amount"
        }
    }
}

/// Invoice as returned to callers, carrying the computed total.
///
/// Serializes flat, with the line and amount keys spelled the way the
/// invoice was submitted.
#[derive(Debug, Clone)]
pub struct InvoiceSummary {
    pub invoice: Invoice,
    pub total_amount: i64,
    pub spelling: InvoiceSpelling,
}

impl InvoiceSummary {
    /// Answer with the given key spelling
    pub fn with_spelling(mut self, spelling: InvoiceSpelling) -> Self {
        self.spelling = spelling;
        self
    }
}

impl From<Invoice> for InvoiceSummary {
    fn from(invoice: Invoice) -> Self {
        let total_amount = invoice.total_amount();
        Self {
            invoice,
            total_amount,
            spelling: InvoiceSpelling::default(),
        }
    }
}

impl Serialize for InvoiceSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let invoice = &self.invoice;
        let mut state = serializer.serialize_struct("InvoiceSummary", 7)?;
        state.serialize_field("id", &invoice.id)?;
        state.serialize_field("client", &invoice.client)?;
        state.serialize_field(self.spelling.lines_key(), &invoice.transactions)?;
        state.serialize_field(self.spelling.amount_key(), &invoice.amount)?;
        state.serialize_field("description", &invoice.description)?;
        state.serialize_field("date", &invoice.date)?;
        state.serialize_field("total_amount", &self.total_amount)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(amount: i64) -> InvoiceLine {
        InvoiceLine {
            id: None,
            client_id: ClientId(1),
            amount,
            description: "line".to_string(),
        }
    }

    fn invoice(amounts: &[i64], amount: i64) -> Invoice {
        Invoice {
            id: 1,
            client: ClientProfile {
                name: "Mauricio".to_string(),
                age: 40,
                email: "mauricio@test.com".to_string(),
                phone: None,
            },
            transactions: amounts.iter().copied().map(line).collect(),
            amount,
            description: "monthly".to_string(),
            date: "2024-01-31".to_string(),
        }
    }

    #[test]
    fn test_total_ignores_supplied_amount() {
        let inv = invoice(&[10, 15], 999);
        assert_eq!(inv.total_amount(), 25);
        assert_eq!(inv.amount, 999);
    }

    #[test]
    fn test_total_of_empty_invoice_is_zero() {
        assert_eq!(invoice(&[], 5).total_amount(), 0);
    }

    #[test]
    fn test_total_saturates() {
        assert_eq!(invoice(&[i64::MAX, 1], 0).total_amount(), i64::MAX);
    }

    #[test]
    fn test_accepts_legacy_field_names() {
        let json = serde_json::json!({
            "id": 7,
            "client": {"name": "A", "age": 30, "email": "a@x.com"},
            "transaction": [{"client_id": 1, "amount": 10, "description": "x"}],
            "ammount": 3,
            "description": "d",
            "date": "2024-02-01"
        });
        let inv: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(inv.transactions.len(), 1);
        assert_eq!(inv.amount, 3);
    }

    #[test]
    fn test_summary_serializes_flat_with_total() {
        let summary = InvoiceSummary::from(invoice(&[10, 15], 1));
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["total_amount"], 25);
        assert_eq!(value["amount"], 1);
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_summary_echoes_legacy_keys() {
        let summary = InvoiceSummary::from(invoice(&[10, 15], 1)).with_spelling(InvoiceSpelling {
            legacy_lines: true,
            legacy_amount: false,
        });
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["transaction"].as_array().unwrap().len(), 2);
        assert!(value.get("transactions").is_none());
        assert_eq!(value["amount"], 1);
        assert!(value.get("ammount").is_none());
    }
}
