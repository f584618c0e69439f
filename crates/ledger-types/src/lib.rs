//! Ledger Types - Shared domain types
//!
//! This crate contains domain types used across Ledger crates:
//! - Clients and their editable profile
//! - Subscription plans and client enrollments
//! - Transactions and the transient invoice aggregate

pub mod billing;
pub mod client;
pub mod subscription;

pub use billing::*;
pub use client::*;
pub use subscription::*;
