//! Ledger service errors

use ledger_db::DbError;
use thiserror::Error;

use crate::validation::{FieldError, ValidationErrors};

/// Errors returned by the ledger services
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Client not found
    #[error("client not found")]
    ClientNotFound,

    /// Subscription plan not found
    #[error("subscription not found")]
    SubscriptionNotFound,

    /// One or more fields failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl LedgerError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ClientNotFound | Self::SubscriptionNotFound)
    }

    /// Field errors, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Map a store write failure, turning a unique violation on email into
    /// the same error the pre-insert check produces
    pub(crate) fn from_client_write(err: DbError) -> Self {
        if err.is_unique_violation() {
            Self::Validation(FieldError::duplicate_email().into())
        } else {
            Self::Database(err)
        }
    }
}

impl From<FieldError> for LedgerError {
    fn from(error: FieldError) -> Self {
        Self::Validation(error.into())
    }
}
