//! # Domain Types
//!
//! Core domain types used throughout CanScout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Inventory     │   │    Location     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  product_id     │   │  id (UUID)      │       │
//! │  │  brand          │   │  location_id    │──►│  name, address  │       │
//! │  │  flavor         │   │  price_cents    │   │  city, state    │       │
//! │  │  size           │   │  in_stock       │   │  lat / lng      │       │
//! │  │  barcode        │   │  last_updated   │   │  (geog in DB)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Identity rules (enforced by UNIQUE constraints in the database):       │
//! │  • Product   = (brand, flavor, size)                                    │
//! │  • Inventory = (location_id, product_id)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `New*` types are the write payloads accepted from the admin UI and the
//! discovery import. They are normalized (trimmed, blank optionals dropped)
//! and validated before a repository sees them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::validation::{
    normalize_barcode, validate_barcode, validate_coordinate, validate_optional_range,
    validate_optional_text, validate_text, ValidationResult,
};

// =============================================================================
// Coordinate
// =============================================================================

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Checks latitude/longitude ranges.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_coordinate(self.latitude, self.longitude)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry: one brand/flavor/size combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    #[ts(as = "String")]
    pub id: Uuid,

    /// Brand, e.g. "Monster Energy".
    pub brand: String,

    /// Flavor, e.g. "Ultra White".
    pub flavor: String,

    /// Container size as printed, e.g. "16 fl oz".
    pub size: String,

    /// Caffeine per container in milligrams.
    pub caffeine_mg: Option<i32>,

    /// Sugar per container in grams.
    pub sugar_g: Option<i32>,

    /// Calories per container.
    pub calories: Option<i32>,

    /// UPC/EAN digits as decoded by the scanner.
    pub barcode: Option<String>,

    pub description: Option<String>,

    pub image_url: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// "Brand Flavor (size)" label used in logs and the scan confirmation.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.brand, self.flavor, self.size)
    }
}

/// Write payload for creating or replacing a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub brand: String,
    pub flavor: String,
    pub size: String,
    #[serde(default)]
    pub caffeine_mg: Option<i32>,
    #[serde(default)]
    pub sugar_g: Option<i32>,
    #[serde(default)]
    pub calories: Option<i32>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Trims every text field and drops blank optionals.
    ///
    /// Barcodes also lose embedded spaces and dashes (`"0 70847 81116 9"`).
    pub fn normalized(self) -> Self {
        NewProduct {
            brand: self.brand.trim().to_string(),
            flavor: self.flavor.trim().to_string(),
            size: self.size.trim().to_string(),
            caffeine_mg: self.caffeine_mg,
            sugar_g: self.sugar_g,
            calories: self.calories,
            barcode: self
                .barcode
                .map(|b| normalize_barcode(&b))
                .filter(|b| !b.is_empty()),
            description: trim_optional(self.description),
            image_url: trim_optional(self.image_url),
        }
    }

    /// Applies the catalog field rules.
    ///
    /// ## Rules
    /// - brand, flavor: required, ≤ 100 characters
    /// - size: required, ≤ 50 characters
    /// - caffeine 0..=2000 mg, sugar 0..=500 g, calories 0..=5000
    /// - barcode: 6-14 digits when present
    pub fn validate(&self) -> ValidationResult<()> {
        validate_text("brand", &self.brand, 100)?;
        validate_text("flavor", &self.flavor, 100)?;
        validate_text("size", &self.size, 50)?;
        validate_optional_range("caffeine_mg", self.caffeine_mg, 0, 2000)?;
        validate_optional_range("sugar_g", self.sugar_g, 0, 500)?;
        validate_optional_range("calories", self.calories, 0, 5000)?;
        if let Some(barcode) = &self.barcode {
            validate_barcode(barcode)?;
        }
        validate_optional_text("description", self.description.as_deref(), 2000)?;
        validate_optional_text("image_url", self.image_url.as_deref(), 2048)?;
        Ok(())
    }
}

// =============================================================================
// Location
// =============================================================================

/// A retail store.
///
/// The database keeps a `geography(Point)` column in sync with
/// `latitude`/`longitude` through a trigger; it is never read back here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Location {
    #[ts(as = "String")]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Write payload for creating or replacing a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    pub fn normalized(self) -> Self {
        NewLocation {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_text("name", &self.name, 200)?;
        validate_text("address", &self.address, 200)?;
        validate_text("city", &self.city, 100)?;
        validate_text("state", &self.state, 50)?;
        validate_text("postal_code", &self.postal_code, 20)?;
        validate_coordinate(self.latitude, self.longitude)
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Price/availability of one product at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryItem {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub location_id: Uuid,
    #[ts(as = "String")]
    pub product_id: Uuid,
    /// Shelf price in cents; `None` when nobody has reported one yet.
    #[ts(type = "number | null")]
    pub price_cents: Option<i64>,
    pub in_stock: bool,
    /// Refreshed by the database on every write.
    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
}

/// An inventory row joined with its product, for a store's detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryEntry {
    #[ts(as = "String")]
    pub inventory_id: Uuid,
    #[ts(as = "String")]
    pub product_id: Uuid,
    pub brand: String,
    pub flavor: String,
    pub size: String,
    pub barcode: Option<String>,
    #[ts(type = "number | null")]
    pub price_cents: Option<i64>,
    pub in_stock: bool,
    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
}

// =============================================================================
// Nearby Search
// =============================================================================

/// A location returned by a distance query.
///
/// `price_cents`, `in_stock` and `last_updated` are only filled when the
/// query was filtered to a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct NearbyLocation {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub location: Location,

    /// Geodesic distance from the query point in meters.
    pub distance_m: f64,

    #[ts(type = "number | null")]
    pub price_cents: Option<i64>,

    pub in_stock: Option<bool>,

    #[ts(as = "Option<String>")]
    pub last_updated: Option<DateTime<Utc>>,
}

// =============================================================================
// Helpers
// =============================================================================

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn monster() -> NewProduct {
        NewProduct {
            brand: "  Monster Energy ".to_string(),
            flavor: "Ultra White".to_string(),
            size: "16 fl oz".to_string(),
            caffeine_mg: Some(150),
            sugar_g: Some(0),
            calories: Some(10),
            barcode: Some(" 0 70847 81116 9 ".to_string()),
            description: Some("   ".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_new_product_normalized() {
        let product = monster().normalized();
        assert_eq!(product.brand, "Monster Energy");
        assert_eq!(product.barcode.as_deref(), Some("070847811169"));
        assert_eq!(product.description, None);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_new_product_rejects_blank_brand() {
        let mut product = monster();
        product.brand = "   ".to_string();
        assert!(product.normalized().validate().is_err());
    }

    #[test]
    fn test_new_product_rejects_absurd_caffeine() {
        let mut product = monster();
        product.caffeine_mg = Some(9000);
        assert!(product.normalized().validate().is_err());
    }

    #[test]
    fn test_new_product_rejects_bad_barcode() {
        let mut product = monster();
        product.barcode = Some("ABC123".to_string());
        assert!(product.normalized().validate().is_err());
    }

    #[test]
    fn test_new_location_validation() {
        let location = NewLocation {
            name: " Shell ".to_string(),
            address: "100 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62701".to_string(),
            latitude: 39.7817,
            longitude: -89.6501,
        }
        .normalized();
        assert_eq!(location.name, "Shell");
        assert!(location.validate().is_ok());

        let off_planet = NewLocation {
            latitude: 91.0,
            ..location
        };
        assert!(off_planet.validate().is_err());
    }

    #[test]
    fn test_nearby_location_serializes_flat() {
        let now = Utc::now();
        let nearby = NearbyLocation {
            location: Location {
                id: Uuid::nil(),
                name: "Shell".to_string(),
                address: "100 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                postal_code: "62701".to_string(),
                latitude: 39.7817,
                longitude: -89.6501,
                created_at: now,
                updated_at: now,
            },
            distance_m: 420.5,
            price_cents: Some(299),
            in_stock: Some(true),
            last_updated: Some(now),
        };

        let json = serde_json::to_value(&nearby).unwrap();
        assert_eq!(json["name"], "Shell");
        assert_eq!(json["distance_m"], 420.5);
        assert_eq!(json["price_cents"], 299);
        assert!(json.get("location").is_none());
    }
}
