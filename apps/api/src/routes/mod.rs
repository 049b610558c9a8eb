//! HTTP routes, one module per resource. Everything is mounted under `/api`.
//!
//! | Method | Path |
//! |--------|------|
//! | GET | `/api/health` |
//! | GET | `/api/products/search?q=&limit=` |
//! | GET, POST | `/api/products` |
//! | GET | `/api/products/barcode/{barcode}` |
//! | GET, PUT, DELETE | `/api/products/{id}` |
//! | GET, POST | `/api/locations` |
//! | GET | `/api/locations/nearby?lat=&lng=&radius_m=&limit=&product_id=` |
//! | GET, PUT, DELETE | `/api/locations/{id}` |
//! | GET | `/api/locations/{id}/inventory` |
//! | DELETE | `/api/inventory/{id}` |
//! | POST | `/api/scan` |
//! | GET, POST | `/api/geocode` |
//! | POST | `/api/discover` |

mod discover;
mod geocode;
mod health;
mod inventory;
mod locations;
mod products;
mod scan;

use axum::Router;

use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let api = Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(locations::router())
        .merge(inventory::router())
        .merge(scan::router())
        .merge(geocode::router())
        .merge(discover::router())
        .fallback(not_found);

    Router::new().nest("/api", api).fallback(not_found)
}

async fn not_found() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "No such endpoint")
}
