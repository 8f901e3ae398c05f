//! Aggregate views (admin stats, household summary)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request counts by status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RequestStats {
    pub total: i64,
    pub open: i64,
    pub assigned: i64,
}

/// Per-material ledger totals for one household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MaterialTotal {
    pub material: String,
    pub weight: f64,
    pub income: f64,
}

/// Household dashboard summary, computed from the ledger and token balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSummary {
    pub household: String,
    pub total_kg: f64,
    pub by_material: BTreeMap<String, f64>,
    pub income: f64,
    pub tokens: i64,
}

impl HouseholdSummary {
    pub fn from_totals(household: impl Into<String>, totals: &[MaterialTotal], tokens: i64) -> Self {
        let mut summary = Self {
            household: household.into(),
            tokens,
            ..Default::default()
        };
        for t in totals {
            summary.total_kg += t.weight;
            summary.income += t.income;
            *summary.by_material.entry(t.material.clone()).or_insert(0.0) += t.weight;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_totals() {
        let totals = vec![
            MaterialTotal {
                material: "Kertas".into(),
                weight: 10.0,
                income: 30000.0,
            },
            MaterialTotal {
                material: "Plastik PET".into(),
                weight: 2.5,
                income: 10000.0,
            },
        ];
        let s = HouseholdSummary::from_totals("H1", &totals, 125);
        assert_eq!(s.total_kg, 12.5);
        assert_eq!(s.income, 40000.0);
        assert_eq!(s.by_material.get("Kertas"), Some(&10.0));
        assert_eq!(s.tokens, 125);
    }

    #[test]
    fn test_summary_empty() {
        let s = HouseholdSummary::from_totals("H2", &[], 0);
        assert_eq!(s.total_kg, 0.0);
        assert!(s.by_material.is_empty());
    }
}
