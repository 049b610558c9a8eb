//! # canscout-core: Pure Domain Logic for CanScout
//!
//! This crate holds the domain model of the store locator as plain data and
//! pure functions. Nothing in here talks to a database or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CanScout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Search ──► Map ──► Barcode Scanner ──► Admin Table           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /products/search, /locations/nearby, /scan, /geocode ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ canscout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CoreError │  │  barcode  │  │   │
//! │  │   │  Location │  │  parsing  │  │           │  │  coords   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          canscout-db (PostGIS)  /  canscout-geo (HTTP)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Location, InventoryItem, ...)
//! - [`money`] - Integer-cent prices and price text parsing
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use canscout_core::money::Money;
//! use canscout_core::validation::validate_barcode;
//!
//! let price: Money = "2.99".parse().unwrap();
//! assert_eq!(price.cents(), 299);
//!
//! assert!(validate_barcode("070847811169").is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of search results returned to the search-as-you-type box.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Hard cap on search results.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Default page size for the admin catalog table.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Hard cap on admin page size.
pub const MAX_LIST_LIMIT: u32 = 500;

/// Default nearby-search radius in meters (~6 miles).
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 10_000.0;

/// Largest nearby-search radius accepted, in meters.
pub const MAX_NEARBY_RADIUS_M: f64 = 80_000.0;

/// Default number of nearby locations returned.
pub const DEFAULT_NEARBY_LIMIT: u32 = 50;

/// Hard cap on nearby locations returned.
pub const MAX_NEARBY_LIMIT: u32 = 200;

/// A scan resolved by coordinate to a store farther than this is suspicious.
///
/// The scan still succeeds; the caller gets a warning instead.
pub const FAR_SCAN_WARNING_M: f64 = 1_000.0;
