//! Pickup Request Model

use super::ledger::LedgerEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pickup request status
///
/// The only transition is `Open -> Assigned`; `Assigned` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum PickupStatus {
    #[default]
    Open,
    Assigned,
}

impl PickupStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Assigned => "ASSIGNED",
        }
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(&self, next: PickupStatus) -> bool {
        matches!((self, next), (Self::Open, Self::Assigned))
    }
}

impl fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickupStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "ASSIGNED" => Ok(Self::Assigned),
            other => Err(format!("unknown pickup status: {other}")),
        }
    }
}

/// Pickup request entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PickupRequest {
    pub id: i64,
    pub created_at: String,
    pub household: String,
    pub address: String,
    /// Material reported by the household
    pub material: String,
    /// Material predicted by the classifier, if a photo was supplied
    pub model_material: Option<String>,
    /// Estimated weight in kg
    pub weight: f64,
    pub notes: Option<String>,
    /// Opaque photo reference, never inspected by the store
    pub photo_ref: Option<String>,
    pub status: PickupStatus,
    /// Set iff `status == Assigned`
    pub assigned_collector: Option<String>,
    /// Ledger entry produced when the pickup was settled
    pub tx_id: Option<String>,
}

impl PickupRequest {
    pub fn is_open(&self) -> bool {
        self.status == PickupStatus::Open
    }
}

/// Create pickup payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickupCreate {
    pub household: String,
    pub address: String,
    pub material: String,
    pub weight: f64,
    /// Collector chosen by the household; echoed in the handle, not assigned
    #[serde(default)]
    pub collector: Option<String>,
    #[serde(default)]
    pub model_material: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_ref: Option<String>,
}

/// Assign collector payload (collector accepts a request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupAssign {
    pub collector: String,
}

/// Tracking handle returned when a pickup is scheduled
///
/// `status` is the handle's own label ([`PickupHandle::SCHEDULED`]); the
/// stored request itself starts `OPEN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupHandle {
    /// Fresh opaque tracking identifier
    pub pickup_id: String,
    /// Store row id of the pickup request
    pub request_id: i64,
    pub status: String,
    pub collector: Option<String>,
}

impl PickupHandle {
    pub const SCHEDULED: &'static str = "SCHEDULED";
}

/// Everything written by one completed pickup (request, ledger entry, tokens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupReceipt {
    pub request: PickupRequest,
    pub entry: LedgerEntry,
    /// Tokens granted for this pickup
    pub tokens: i64,
    /// Household balance after the award
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&PickupStatus::Open).unwrap(), "\"OPEN\"");
        let status: PickupStatus = serde_json::from_str("\"ASSIGNED\"").unwrap();
        assert_eq!(status, PickupStatus::Assigned);
    }

    #[test]
    fn test_status_transitions() {
        assert!(PickupStatus::Open.can_transition_to(PickupStatus::Assigned));
        assert!(!PickupStatus::Assigned.can_transition_to(PickupStatus::Open));
        assert!(!PickupStatus::Assigned.can_transition_to(PickupStatus::Assigned));
        assert!(!PickupStatus::Open.can_transition_to(PickupStatus::Open));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("open".parse::<PickupStatus>().unwrap(), PickupStatus::Open);
        assert_eq!("ASSIGNED".parse::<PickupStatus>().unwrap(), PickupStatus::Assigned);
        assert!("SCHEDULED".parse::<PickupStatus>().is_err());
    }

    #[test]
    fn test_create_payload_defaults() {
        let json = r#"{"household":"H1","address":"Jl. Dago 1","material":"Kertas","weight":1.5}"#;
        let payload: PickupCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.household, "H1");
        assert!(payload.collector.is_none());
        assert!(payload.photo_ref.is_none());
    }
}
