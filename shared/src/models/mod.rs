//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Pickup ids are `i64` (SQLite INTEGER PRIMARY KEY); ledger ids are hex digests.

pub mod classification;
pub mod collector;
pub mod ledger;
pub mod pickup;
pub mod stats;
pub mod token;

// Re-exports
pub use classification::*;
pub use collector::*;
pub use ledger::*;
pub use pickup::*;
pub use stats::*;
pub use token::*;
