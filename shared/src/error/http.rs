//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::PickupNotFound
            | Self::CollectorNotFound
            | Self::LedgerEntryNotFound
            | Self::ImageNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::PickupAlreadyAssigned => StatusCode::CONFLICT,

            // 422 Unprocessable
            Self::NoEligibleCollector | Self::BalanceOverflow => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::PickupNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::LedgerEntryNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::PickupAlreadyAssigned.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_status() {
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidWeight.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidPrice.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::BalanceOverflow.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
