//! # Scan Workflow
//!
//! A shopper scans a can on the shelf and reports what they see.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/scan                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate ──── bad barcode / price / coordinate ──────────► 400         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  product by barcode ──── none ────────────────────────────► 404         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  location_id given? ── yes ── get_by_id ──── none ────────► 404         │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  nearest(lat, lng) ──── no stores ────────────────────────► 404         │
//! │       │   farther than 1 km → warning (still succeeds)                  │
//! │       ▼                                                                 │
//! │  upsert inventory → { created, product, location, inventory }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;
use uuid::Uuid;

use canscout_core::validation::{
    normalize_barcode, validate_barcode, validate_coordinate, validate_price_cents, validate_uuid,
};
use canscout_core::{
    Coordinate, CoreError, InventoryItem, Location, Money, Product, ValidationError,
    FAR_SCAN_WARNING_M,
};
use canscout_db::Database;

use crate::error::ApiError;

/// Body of `POST /api/scan`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct ScanRequest {
    pub barcode: String,

    /// Store the scan happened at. Takes precedence over coordinates.
    #[serde(default)]
    pub location_id: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Shelf price as typed, e.g. `"2.99"`.
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub price_cents: Option<i64>,

    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Where the scan should be recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanTarget {
    Location(Uuid),
    Near(Coordinate),
}

/// A scan that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedScan {
    pub barcode: String,
    pub target: ScanTarget,
    pub price_cents: Option<i64>,
    pub in_stock: bool,
}

impl ScanRequest {
    /// Checks every field without touching the database.
    pub fn validate(&self) -> Result<ValidatedScan, ValidationError> {
        let barcode = normalize_barcode(&self.barcode);
        validate_barcode(&barcode)?;

        let location_id = self
            .location_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        let target = match (location_id, self.latitude, self.longitude) {
            (Some(id), _, _) => ScanTarget::Location(validate_uuid("location_id", id)?),
            (None, Some(latitude), Some(longitude)) => {
                validate_coordinate(latitude, longitude)?;
                ScanTarget::Near(Coordinate::new(latitude, longitude))
            }
            (None, Some(_), None) => return Err(ValidationError::required("longitude")),
            (None, None, Some(_)) => return Err(ValidationError::required("latitude")),
            (None, None, None) => {
                return Err(ValidationError::required("location_id or latitude/longitude"))
            }
        };

        let price_text = self.price.as_deref().map(str::trim).filter(|p| !p.is_empty());
        let price_cents = match (price_text, self.price_cents) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::invalid_format(
                    "price",
                    "send either price or price_cents, not both",
                ))
            }
            (Some(text), None) => Some(text.parse::<Money>()?.cents()),
            (None, Some(cents)) => {
                validate_price_cents(cents)?;
                Some(cents)
            }
            (None, None) => None,
        };

        Ok(ValidatedScan {
            barcode,
            target,
            price_cents,
            in_stock: self.in_stock,
        })
    }
}

/// What a successful scan reports back.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ScanOutcome {
    /// `true` when this scan created the inventory row.
    pub created: bool,
    pub product: Product,
    pub location: Location,
    pub inventory: InventoryItem,
    /// Distance from the reported coordinate, for coordinate scans.
    pub distance_m: Option<f64>,
    /// Set when the nearest store is implausibly far away.
    pub warning: Option<String>,
}

/// Runs the scan workflow.
pub async fn record_scan(db: &Database, request: &ScanRequest) -> Result<ScanOutcome, ApiError> {
    let scan = request.validate()?;

    let product = db
        .products()
        .get_by_barcode(&scan.barcode)
        .await?
        .ok_or_else(|| CoreError::BarcodeNotFound(scan.barcode.clone()))?;

    let (location, distance_m) = match scan.target {
        ScanTarget::Location(id) => {
            let location = db
                .locations()
                .get_by_id(id)
                .await?
                .ok_or_else(|| CoreError::LocationNotFound(id.to_string()))?;
            (location, None)
        }
        ScanTarget::Near(center) => {
            let nearest = db
                .locations()
                .nearest(center)
                .await?
                .ok_or(CoreError::NoLocationsOnFile)?;
            (nearest.location, Some(nearest.distance_m))
        }
    };

    let warning = distance_m.filter(|d| *d > FAR_SCAN_WARNING_M).map(|d| {
        warn!(
            barcode = %scan.barcode,
            location_id = %location.id,
            distance_m = d,
            "Nearest store is far from the scan position"
        );
        format!(
            "Nearest store {} is {:.1} km away; check the location is correct",
            location.name,
            d / 1000.0
        )
    });

    let (inventory, created) = db
        .inventory()
        .upsert(location.id, product.id, scan.price_cents, scan.in_stock)
        .await?;

    info!(
        product = %product.label(),
        location = %location.name,
        created,
        price_cents = ?inventory.price_cents,
        in_stock = inventory.in_stock,
        "Scan recorded"
    );

    Ok(ScanOutcome {
        created,
        product,
        location,
        inventory,
        distance_m,
        warning,
    })
}
