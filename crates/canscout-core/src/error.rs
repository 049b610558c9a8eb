//! # Error Types
//!
//! Domain-specific error types for canscout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  canscout-core errors (this file)                                      │
//! │  ├── CoreError        - Domain lookups that came back empty            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  canscout-db errors        └── DbError   - Database failures            │
//! │  canscout-geo errors       └── GeoError  - Provider failures            │
//! │  apps/api                  └── ApiError  - What the client sees         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                   │
//! │        DbError ─────────────────────┼──► ApiError → JSON envelope       │
//! │        GeoError ────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised by the catalog and scan workflows.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product has the given id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No product carries the scanned barcode.
    ///
    /// ## User Workflow
    /// ```text
    /// Camera decodes 0611269991000
    ///      │
    ///      ▼
    /// POST /api/scan { barcode: "0611269991000", ... }
    ///      │
    ///      ▼
    /// BarcodeNotFound("0611269991000") → 404, UI offers "add to catalog"
    /// ```
    #[error("No product with barcode {0}")]
    BarcodeNotFound(String),

    /// No location has the given id.
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// A coordinate-based scan could not resolve any store at all.
    #[error("No locations on file to match the scan against")]
    NoLocationsOnFile,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any query runs so bad input never reaches the database.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, non-numeric barcode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BarcodeNotFound("0611269991000".to_string());
        assert_eq!(err.to_string(), "No product with barcode 0611269991000");

        let err = CoreError::NoLocationsOnFile;
        assert_eq!(
            err.to_string(),
            "No locations on file to match the scan against"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("barcode");
        assert_eq!(err.to_string(), "barcode is required");

        let err = ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: -90,
            max: 90,
        };
        assert_eq!(err.to_string(), "latitude must be between -90 and 90");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("brand").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
