//! # canscout-db: Database Layer for CanScout
//!
//! This crate provides database access for CanScout.
//! It uses PostgreSQL with the PostGIS extension through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CanScout Data Flow                               │
//! │                                                                         │
//! │  axum handler (GET /api/locations/nearby)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  canscout-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │ 001_products │  │   │
//! │  │   │ PgPool        │◄───│ LocationRepo  │    │ 002_locations│  │   │
//! │  │   │               │    │ InventoryRepo │    │ 003_inventory│  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PostgreSQL 13+ with PostGIS 3                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use canscout_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("postgres://localhost/canscout")).await?;
//!
//! let products = db.products().search("monster", 20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::inventory::InventoryRepository;
pub use repository::location::LocationRepository;
pub use repository::product::ProductRepository;

/// Constraint names surfaced in `DbError::UniqueViolation`.
pub mod constraints {
    pub const PRODUCT_IDENTITY: &str = "products_brand_flavor_size_key";
    pub const PRODUCT_BARCODE: &str = "products_barcode_key";
    pub const INVENTORY_IDENTITY: &str = "inventory_location_product_key";
}
