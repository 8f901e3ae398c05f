//! Ledger
//!
//! Settled pickups keyed by a content-derived `tx_id`. The ledger is a keyed
//! upsert, not a chained log: `tx_id` identifies an entry, it does not prove
//! anything about its neighbours.

pub mod hash;
mod service;

pub use hash::CanonicalPayload;
pub use service::{SettlementService, build_entry};
