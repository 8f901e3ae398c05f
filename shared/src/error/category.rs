//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 4xxx: Pickup request errors
/// - 5xxx: Ledger errors
/// - 6xxx: Classification errors
/// - 7xxx: Token errors
/// - 9xxx: System errors
///
/// Unassigned ranges fall back to [`ErrorCategory::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Pickup request errors (4xxx)
    Pickup,
    /// Ledger / settlement errors (5xxx)
    Ledger,
    /// Classification errors (6xxx)
    Classification,
    /// Token errors (7xxx)
    Token,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            4000..5000 => Self::Pickup,
            5000..6000 => Self::Ledger,
            6000..7000 => Self::Classification,
            7000..8000 => Self::Token,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Pickup => "pickup",
            Self::Ledger => "ledger",
            Self::Classification => "classification",
            Self::Token => "token",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
