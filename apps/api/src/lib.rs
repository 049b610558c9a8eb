//! # CanScout API
//!
//! HTTP JSON API for the energy drink store locator.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CanScout API Server                             │
//! │                                                                         │
//! │  Browser ───► axum (3001) ───► routes ───► services                     │
//! │                                   │            │                        │
//! │                                   ▼            ▼                        │
//! │                            canscout-db    canscout-geo                  │
//! │                          (PostgreSQL +   (Nominatim,                    │
//! │                             PostGIS)      Overpass)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use response::{ApiResponse, ApiResult};
pub use state::AppState;

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "info,canscout=debug,tower_http=info";

/// Builds the application router with middleware.
pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
