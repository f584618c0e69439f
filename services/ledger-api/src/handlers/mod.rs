//! REST API handlers

pub mod clients;
pub mod health;
pub mod root;
pub mod shared;
pub mod subscriptions;
pub mod transactions;

pub use clients::*;
pub use health::*;
pub use root::*;
pub use subscriptions::*;
pub use transactions::*;
