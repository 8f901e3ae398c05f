//! Token Balance Model

use serde::{Deserialize, Serialize};

/// Per-household reward balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TokenBalance {
    pub household: String,
    pub balance: i64,
}

/// Award tokens payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAward {
    pub household: String,
    /// Accepted for future reward policies, unused today
    #[serde(default)]
    pub material: String,
    pub weight: f64,
}

/// Result of a single award
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAwardResult {
    pub household: String,
    /// Tokens granted by this call
    pub tokens: i64,
    /// Balance after the award
    pub balance: i64,
}
