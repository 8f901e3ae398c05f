//! Collector Model (reference data)

use serde::{Deserialize, Serialize};

/// Recycler / buyer that accepts certain materials at a fixed price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    pub name: String,
    /// Accepted material labels
    pub materials: Vec<String>,
    pub price_per_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Operating radius in km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
}

impl Collector {
    /// Exact, case-sensitive label match
    pub fn accepts(&self, material: &str) -> bool {
        self.materials.iter().any(|m| m == material)
    }
}
