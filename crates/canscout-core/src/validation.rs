//! # Validation Module
//!
//! Input validation utilities for CanScout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React)                                              │
//! │  ├── Scanner only emits decoded digits                                  │
//! │  └── Form-level required checks                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: axum handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: field rules, ranges, barcode shape                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                         │
//! │  ├── NOT NULL / CHECK constraints                                       │
//! │  ├── UNIQUE (brand, flavor, size), UNIQUE (location_id, product_id)     │
//! │  └── Foreign key constraints                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use canscout_core::validation::{validate_barcode, validate_coordinate};
//!
//! validate_barcode("070847811169").unwrap();
//! validate_coordinate(39.78, -89.65).unwrap();
//! ```

use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::MAX_PRICE_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest search text accepted from the search box.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

// =============================================================================
// Text Validators
// =============================================================================

/// Validates a required text field: non-blank and at most `max` characters.
pub fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Length check for an optional text field; `None` always passes.
pub fn validate_optional_text(field: &str, value: Option<&str>, max: usize) -> ValidationResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Range check for an optional nutrition figure; `None` always passes.
pub fn validate_optional_range(
    field: &str,
    value: Option<i32>,
    min: i32,
    max: i32,
) -> ValidationResult<()> {
    match value {
        Some(v) if v < min || v > max => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: min.into(),
            max: max.into(),
        }),
        _ => Ok(()),
    }
}

/// Validates and trims a search query.
///
/// An empty query is allowed: it lists the catalog.
///
/// ```rust
/// use canscout_core::validation::validate_search_query;
///
/// assert_eq!(validate_search_query("  monster ").unwrap(), "monster");
/// assert!(validate_search_query(&"x".repeat(101)).is_err());
/// ```
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "q".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Escapes `%`, `_` and `\` so user text matches literally inside ILIKE.
///
/// ```rust
/// use canscout_core::validation::escape_like;
///
/// assert_eq!(escape_like("100%_juice"), "100\\%\\_juice");
/// ```
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// =============================================================================
// Barcode Validators
// =============================================================================

/// Strips whitespace and dashes from scanner or hand-typed barcode text.
pub fn normalize_barcode(barcode: &str) -> String {
    barcode
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Validates a barcode.
///
/// ## Rules
/// - Digits only
/// - 6 to 14 digits (UPC-E through GTIN-14)
///
/// The check digit is not verified; the scanner already did.
///
/// ## Example
/// ```rust
/// use canscout_core::validation::validate_barcode;
///
/// assert!(validate_barcode("070847811169").is_ok());
/// assert!(validate_barcode("12345").is_err());
/// assert!(validate_barcode("07084781116X").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    if barcode.is_empty() {
        return Err(ValidationError::required("barcode"));
    }

    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "barcode",
            "must contain only digits",
        ));
    }

    if !(6..=14).contains(&barcode.len()) {
        return Err(ValidationError::invalid_format(
            "barcode",
            "must be 6 to 14 digits",
        ));
    }

    Ok(())
}

/// Whether search text looks like a scanned barcode (8-13 digits).
///
/// The search endpoint tries an exact barcode lookup first for these.
pub fn is_barcode_query(query: &str) -> bool {
    (8..=13).contains(&query.len()) && query.chars().all(|c| c.is_ascii_digit())
}

// =============================================================================
// Geographic Validators
// =============================================================================

/// Validates a WGS84 coordinate.
///
/// ```rust
/// use canscout_core::validation::validate_coordinate;
///
/// assert!(validate_coordinate(0.0, 0.0).is_ok());
/// assert!(validate_coordinate(-91.0, 0.0).is_err());
/// assert!(validate_coordinate(0.0, f64::NAN).is_err());
/// ```
pub fn validate_coordinate(latitude: f64, longitude: f64) -> ValidationResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: -90,
            max: 90,
        });
    }

    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::OutOfRange {
            field: "longitude".to_string(),
            min: -180,
            max: 180,
        });
    }

    Ok(())
}

/// Validates a search radius in meters against an upper bound.
pub fn validate_radius_m(radius_m: f64, max: f64) -> ValidationResult<f64> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "radius_m".to_string(),
        });
    }

    if radius_m > max {
        return Err(ValidationError::OutOfRange {
            field: "radius_m".to_string(),
            min: 0,
            max: max as i64,
        });
    }

    Ok(radius_m)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Resolves a requested page size: missing → `default`, otherwise `1..=max`.
///
/// ```rust
/// use canscout_core::validation::clamp_limit;
///
/// assert_eq!(clamp_limit(None, 20, 50), 20);
/// assert_eq!(clamp_limit(Some(0), 20, 50), 1);
/// assert_eq!(clamp_limit(Some(999), 20, 50), 50);
/// ```
pub fn clamp_limit(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.map_or(default, |n| n.clamp(1, max))
}

/// Validates a price in cents.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price_cents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Parses an identifier supplied as text.
pub fn validate_uuid(field: &str, value: &str) -> ValidationResult<Uuid> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Uuid::parse_str(value).map_err(|_| ValidationError::invalid_format(field, "must be a UUID"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert!(validate_text("brand", "Monster", 100).is_ok());
        assert!(matches!(
            validate_text("brand", "   ", 100),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_text("size", &"9".repeat(51), 50),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn test_optional_range() {
        assert!(validate_optional_range("caffeine_mg", None, 0, 2000).is_ok());
        assert!(validate_optional_range("caffeine_mg", Some(300), 0, 2000).is_ok());
        assert!(validate_optional_range("caffeine_mg", Some(-1), 0, 2000).is_err());
    }

    #[test]
    fn test_barcode_rules() {
        assert!(validate_barcode("04963406").is_ok()); // EAN-8
        assert!(validate_barcode("10070847811166").is_ok()); // GTIN-14
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("123456789012345").is_err());
        assert_eq!(normalize_barcode(" 0-70847-81116-9 "), "070847811169");
    }

    #[test]
    fn test_is_barcode_query() {
        assert!(is_barcode_query("070847811169"));
        assert!(!is_barcode_query("1234567"));
        assert!(!is_barcode_query("monster"));
        assert!(!is_barcode_query("12345678901234"));
    }

    #[test]
    fn test_radius() {
        assert_eq!(validate_radius_m(500.0, 80_000.0).unwrap(), 500.0);
        assert!(validate_radius_m(0.0, 80_000.0).is_err());
        assert!(validate_radius_m(-5.0, 80_000.0).is_err());
        assert!(validate_radius_m(f64::INFINITY, 80_000.0).is_err());
        assert!(validate_radius_m(80_001.0, 80_000.0).is_err());
    }

    #[test]
    fn test_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(299).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
    }

    #[test]
    fn test_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(validate_uuid("location_id", &id.to_string()).unwrap(), id);
        assert!(validate_uuid("location_id", "store-42").is_err());
        assert!(matches!(
            validate_uuid("location_id", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_escape_like_passthrough() {
        assert_eq!(escape_like("red bull"), "red bull");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }
}
