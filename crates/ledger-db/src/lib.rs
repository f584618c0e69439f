//! Ledger DB - Database abstractions
//!
//! SQLx-based SQLite layer for Ledger services.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_db::{create_pool, create_all_tables, Repositories};
//!
//! let pool = create_pool("sqlite://ledger.db").await?;
//! create_all_tables(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! // Use repositories
//! let client = repos.clients.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pool;
pub mod repo;
pub mod schema;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
pub use schema::create_all_tables;
pub use sqlite::Repositories;
