//! Ledger Entry Model

use serde::{Deserialize, Serialize};

/// Settled transaction between a household and a collector
///
/// `tx_id` is the SHA-256 digest of the entry's canonical payload, so it can be
/// recomputed from the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    pub tx_id: String,
    pub created_at: String,
    pub household: String,
    pub collector: String,
    pub material: String,
    pub weight: f64,
    pub price_per_kg: f64,
    /// `weight * price_per_kg`
    pub total: f64,
    #[serde(default)]
    pub verified: bool,
}

/// Settle payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementInput {
    pub household: String,
    pub collector: String,
    pub material: String,
    pub weight: f64,
    pub price_per_kg: f64,
}

/// Settle request body; the price falls back to the collector's listed price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    pub household: String,
    pub collector: String,
    pub material: String,
    pub weight: f64,
    #[serde(default)]
    pub price_per_kg: Option<f64>,
}
