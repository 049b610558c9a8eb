//! # canscout-geo: OpenStreetMap Adapters for CanScout
//!
//! Two small HTTP clients:
//!
//! - [`Geocoder`] turns an address into coordinates (Nominatim)
//! - [`DiscoveryClient`] finds fuel stations around a point (Overpass)
//!
//! Both share a [`GeoConfig`] and report failures as [`GeoError`]. Neither
//! retries; callers decide what a failure means.
//!
//! ## Usage
//! ```rust,ignore
//! use canscout_geo::{GeoConfig, Geocoder, GeocodeQuery};
//!
//! let geocoder = Geocoder::new(&GeoConfig::default())?;
//! let hit = geocoder
//!     .geocode(&GeocodeQuery::FreeText("1200 S 6th St, Springfield IL".into()))
//!     .await?;
//! println!("{} → {}, {}", hit.display_name, hit.latitude, hit.longitude);
//! ```

pub mod config;
pub mod error;
pub mod geocode;
pub mod overpass;

pub use config::GeoConfig;
pub use error::{GeoError, GeoResult};
pub use geocode::{GeocodeQuery, GeocodeResult, Geocoder, StructuredAddress};
pub use overpass::{
    DiscoveryClient, PoiCandidate, SearchArea, MAX_DISCOVERY_AREAS, MAX_DISCOVERY_RADIUS_M,
};
