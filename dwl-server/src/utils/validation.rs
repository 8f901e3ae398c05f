//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so every handler checks here.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Household ids, collector names, material labels
pub const MAX_NAME_LEN: usize = 200;

/// Pickup notes
pub const MAX_NOTE_LEN: usize = 500;

/// Pickup addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Photo references / file names
pub const MAX_PHOTO_REF_LEN: usize = 255;

/// Heaviest single pickup accepted (kg)
pub const MAX_WEIGHT_KG: f64 = 100_000.0;

/// Highest price per kg accepted; `MAX_WEIGHT_KG * MAX_PRICE_PER_KG` stays
/// far inside the exactly representable f64 range
pub const MAX_PRICE_PER_KG: f64 = 1_000_000_000.0;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

// ── Quantities ──────────────────────────────────────────────────────

/// Weight in kg: finite, in `0..=MAX_WEIGHT_KG`.
pub fn validate_weight(weight: f64) -> Result<(), AppError> {
    if !weight.is_finite() {
        return Err(AppError::invalid_weight(format!("weight must be a finite number, got {weight}")));
    }
    if weight < 0.0 {
        return Err(AppError::invalid_weight(format!("weight must not be negative, got {weight}")));
    }
    if weight > MAX_WEIGHT_KG {
        return Err(AppError::invalid_weight(format!(
            "weight must not exceed {MAX_WEIGHT_KG} kg, got {weight}"
        ))
        .with_detail("max", MAX_WEIGHT_KG));
    }
    Ok(())
}

/// Price per kg: finite, in `0..=MAX_PRICE_PER_KG`.
pub fn validate_price(price_per_kg: f64) -> Result<(), AppError> {
    if !price_per_kg.is_finite() || price_per_kg < 0.0 {
        return Err(AppError::invalid_price(format!(
            "price_per_kg must be a finite non-negative number, got {price_per_kg}"
        )));
    }
    if price_per_kg > MAX_PRICE_PER_KG {
        return Err(AppError::invalid_price(format!(
            "price_per_kg must not exceed {MAX_PRICE_PER_KG}, got {price_per_kg}"
        ))
        .with_detail("max", MAX_PRICE_PER_KG));
    }
    Ok(())
}

/// Bare file name (no directory components), used for upload references.
pub fn validate_file_name(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_PHOTO_REF_LEN)?;
    if value.contains(['/', '\\']) || value == "." || value == ".." || value.contains('\0') {
        return Err(AppError::validation(format!("{field} must be a plain file name")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("H1", "household", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "household", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "household", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some(String::new()), "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("n".repeat(501)), "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_weight() {
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(3.2).is_ok());
        let err = validate_weight(-0.5).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWeight);
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_weight_upper_bound() {
        assert!(validate_weight(MAX_WEIGHT_KG).is_ok());
        let err = validate_weight(MAX_WEIGHT_KG + 1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWeight);
        assert_eq!(validate_weight(1e18).unwrap_err().code, ErrorCode::InvalidWeight);
        assert_eq!(validate_weight(f64::MAX).unwrap_err().code, ErrorCode::InvalidWeight);
    }

    #[test]
    fn test_price() {
        assert!(validate_price(0.0).is_ok());
        assert_eq!(validate_price(-1.0).unwrap_err().code, ErrorCode::InvalidPrice);
        assert!(validate_price(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_price_upper_bound() {
        assert!(validate_price(MAX_PRICE_PER_KG).is_ok());
        assert_eq!(validate_price(1e300).unwrap_err().code, ErrorCode::InvalidPrice);
        // the largest accepted product is still finite and exact
        let total = MAX_WEIGHT_KG * MAX_PRICE_PER_KG;
        assert!(total.is_finite());
        assert_eq!(total, 1e14);
    }

    #[test]
    fn test_file_name() {
        assert!(validate_file_name("20240501_botol.jpg", "photo_ref").is_ok());
        assert!(validate_file_name("../secret.db", "photo_ref").is_err());
        assert!(validate_file_name("a/b.png", "photo_ref").is_err());
        assert!(validate_file_name("a\\b.png", "photo_ref").is_err());
        assert!(validate_file_name("..", "photo_ref").is_err());
    }
}
