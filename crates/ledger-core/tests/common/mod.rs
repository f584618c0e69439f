//! Common test utilities for ledger-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{
    MockClientRepository, MockEnrollmentRepository, MockSubscriptionRepository,
    MockTransactionRepository,
};
