//! Shared handler state.

use canscout_db::Database;
use canscout_geo::{DiscoveryClient, GeoConfig, GeoResult, Geocoder};

/// Cloned into every handler. Each field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub geocoder: Geocoder,
    pub discovery: DiscoveryClient,
}

impl AppState {
    pub fn new(db: Database, geo: &GeoConfig) -> GeoResult<Self> {
        Ok(AppState {
            db,
            geocoder: Geocoder::new(geo)?,
            discovery: DiscoveryClient::new(geo)?,
        })
    }
}
