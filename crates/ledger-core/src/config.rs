//! Ledger service configuration

use crate::validation::ClientRules;

/// Ledger service configuration
#[derive(Debug, Clone, Default)]
pub struct LedgerConfig {
    /// Minimum client age. `None` leaves age unconstrained.
    pub min_client_age: Option<i64>,
}

impl LedgerConfig {
    /// Create a config with default rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Require clients to be at least `age` years old
    pub fn with_min_client_age(mut self, age: i64) -> Self {
        self.min_client_age = Some(age);
        self
    }

    /// Client field rules derived from this config
    pub fn client_rules(&self) -> ClientRules {
        ClientRules {
            min_age: self.min_client_age,
        }
    }
}
