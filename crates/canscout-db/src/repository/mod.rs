//! # Repository Module
//!
//! Database repository implementations for CanScout.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  axum handler / service                                                 │
//! │       │                                                                 │
//! │       │  state.db.locations().nearby(center, 5_000.0, 20, None)         │
//! │       ▼                                                                 │
//! │  LocationRepository                                                     │
//! │  ├── nearby(&self, center, radius_m, limit, product_id)                 │
//! │  ├── nearest(&self, center)                                             │
//! │  └── insert / update / delete ...                                       │
//! │       │                                                                 │
//! │       │  SQL with bound parameters                                      │
//! │       ▼                                                                 │
//! │  PostgreSQL + PostGIS                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD and search
//! - [`LocationRepository`](location::LocationRepository) - Stores and distance queries
//! - [`InventoryRepository`](inventory::InventoryRepository) - Price/stock upserts

pub mod inventory;
pub mod location;
pub mod product;
