//! Ledger Core - Client, subscription and transaction business logic
//!
//! Services enforce the data model's consistency rules on top of the
//! repository traits from `ledger-db`:
//! - client email uniqueness and field validation
//! - enrollment of clients into subscription plans
//! - transactions attributed to existing clients
//! - transient invoices with a computed total
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ledger_core::{ClientService, LedgerConfig};
//! use ledger_db::Repositories;
//!
//! let repos = Repositories::new(pool);
//! let clients = ClientService::new(
//!     Arc::new(repos.clients),
//!     Arc::new(repos.subscriptions),
//!     Arc::new(repos.enrollments),
//!     LedgerConfig::new(),
//! );
//!
//! let client = clients.create(profile).await?;
//! let enrollment = clients.subscribe(client.id, plan_id, EnrollmentStatus::Active).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod subscription;
pub mod transaction;
pub mod validation;

pub use client::ClientService;
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use subscription::SubscriptionService;
pub use transaction::TransactionService;
pub use validation::{FieldError, ValidationErrors, ValidationKind};
