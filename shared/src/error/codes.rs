//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Pickup request errors
//! - 5xxx: Ledger / settlement errors
//! - 6xxx: Classification errors
//! - 7xxx: Token errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 4xxx: Pickup ====================
    /// Pickup request not found
    PickupNotFound = 4001,
    /// Pickup request was already assigned to a collector
    PickupAlreadyAssigned = 4002,
    /// Weight is negative or not a finite number
    InvalidWeight = 4003,
    /// No collector accepts the requested material
    NoEligibleCollector = 4004,
    /// Collector not present in the reference list
    CollectorNotFound = 4005,

    // ==================== 5xxx: Ledger ====================
    /// Ledger entry not found
    LedgerEntryNotFound = 5001,
    /// Price per kg is negative or not a finite number
    InvalidPrice = 5002,

    // ==================== 6xxx: Classification ====================
    /// Invalid/corrupted image file
    InvalidImageFile = 6002,
    /// Image reference could not be resolved
    ImageNotFound = 6003,

    // ==================== 7xxx: Token ====================
    /// Award would push the household balance past `i64::MAX`
    BalanceOverflow = 7001,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Pickup
            ErrorCode::PickupNotFound => "Pickup request not found",
            ErrorCode::PickupAlreadyAssigned => "Pickup request is already assigned",
            ErrorCode::InvalidWeight => "Weight must be a non-negative number within range",
            ErrorCode::NoEligibleCollector => "No collector accepts this material",
            ErrorCode::CollectorNotFound => "Collector not found",

            // Ledger
            ErrorCode::LedgerEntryNotFound => "Ledger entry not found",
            ErrorCode::InvalidPrice => "Price per kg must be a non-negative number within range",

            // Classification
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::ImageNotFound => "Image not found",

            // Token
            ErrorCode::BalanceOverflow => "Token balance would overflow",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Pickup
            4001 => Ok(ErrorCode::PickupNotFound),
            4002 => Ok(ErrorCode::PickupAlreadyAssigned),
            4003 => Ok(ErrorCode::InvalidWeight),
            4004 => Ok(ErrorCode::NoEligibleCollector),
            4005 => Ok(ErrorCode::CollectorNotFound),

            // Ledger
            5001 => Ok(ErrorCode::LedgerEntryNotFound),
            5002 => Ok(ErrorCode::InvalidPrice),

            // Classification
            6002 => Ok(ErrorCode::InvalidImageFile),
            6003 => Ok(ErrorCode::ImageNotFound),

            // Token
            7001 => Ok(ErrorCode::BalanceOverflow),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::PickupNotFound.code(), 4001);
        assert_eq!(ErrorCode::LedgerEntryNotFound.code(), 5001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::PickupAlreadyAssigned,
            ErrorCode::InvalidPrice,
            ErrorCode::ImageNotFound,
            ErrorCode::BalanceOverflow,
            ErrorCode::ConfigError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(6001), Err(InvalidErrorCode(6001)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::PickupAlreadyAssigned).unwrap();
        assert_eq!(json, "4002");
        let code: ErrorCode = serde_json::from_str("5002").unwrap();
        assert_eq!(code, ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::InternalError.to_string(), "E9001");
    }
}
