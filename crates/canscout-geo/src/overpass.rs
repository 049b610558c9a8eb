//! # POI Discovery (Overpass)
//!
//! Finds fuel stations around a point with the OpenStreetMap Overpass API.
//!
//! ## Bulk Discovery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  areas: [A, B, C]                                                       │
//! │                                                                         │
//! │  POST interpreter (A) ──► candidates                                    │
//! │  sleep(politeness_delay)                                                │
//! │  POST interpreter (B) ──► candidates (osm_id already seen → dropped)    │
//! │  sleep(politeness_delay)                                                │
//! │  POST interpreter (C) ──► candidates                                    │
//! │                                                                         │
//! │  Requests are strictly sequential. A failed area fails the whole call.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info, warn};
use ts_rs::TS;
use url::Url;

use canscout_core::validation::validate_coordinate;
use canscout_core::NewLocation;

use crate::config::GeoConfig;
use crate::error::{GeoError, GeoResult};

/// Largest radius for a single discovery area, in meters.
pub const MAX_DISCOVERY_RADIUS_M: f64 = 25_000.0;

/// Most areas accepted in one bulk discovery.
pub const MAX_DISCOVERY_AREAS: usize = 20;

/// Server-side timeout written into every query, in seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

// =============================================================================
// Types
// =============================================================================

/// A circle to search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchArea {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

impl SearchArea {
    pub fn validate(&self) -> GeoResult<()> {
        validate_coordinate(self.latitude, self.longitude)
            .map_err(|e| GeoError::InvalidRequest(e.to_string()))?;

        if !self.radius_m.is_finite() || self.radius_m <= 0.0 || self.radius_m > MAX_DISCOVERY_RADIUS_M {
            return Err(GeoError::InvalidRequest(format!(
                "radius_m must be between 0 and {}",
                MAX_DISCOVERY_RADIUS_M
            )));
        }

        Ok(())
    }

    /// Overpass QL for fuel nodes inside this circle.
    pub fn to_query(&self) -> String {
        format!(
            "[out:json][timeout:{}];node[\"amenity\"=\"fuel\"](around:{:.0},{},{});out body;",
            QUERY_TIMEOUT_SECS, self.radius_m, self.latitude, self.longitude
        )
    }
}

/// A fuel station reported by OpenStreetMap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PoiCandidate {
    #[ts(type = "number")]
    pub osm_id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// "housenumber street", or just the street.
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl PoiCandidate {
    /// The candidate as an importable location.
    ///
    /// `None` when any address field a location requires is missing.
    pub fn to_new_location(&self) -> Option<NewLocation> {
        Some(NewLocation {
            name: self.name.clone(),
            address: self.address.clone()?,
            city: self.city.clone()?,
            state: self.state.clone()?,
            postal_code: self.postal_code.clone()?,
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }

    fn from_element(element: OverpassElement) -> Option<Self> {
        let (latitude, longitude) = (element.lat?, element.lon?);
        let mut tags = element.tags;
        let mut tag = |key: &str| tags.remove(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let brand = tag("brand");
        let name = tag("name")
            .or_else(|| brand.clone())
            .unwrap_or_else(|| "Fuel station".to_string());

        let street = tag("addr:street");
        let housenumber = tag("addr:housenumber");
        let address = match (housenumber, street) {
            (Some(number), Some(street)) => Some(format!("{} {}", number, street)),
            (None, Some(street)) => Some(street),
            _ => None,
        };

        Some(PoiCandidate {
            osm_id: element.id,
            name,
            brand,
            latitude,
            longitude,
            address,
            city: tag("addr:city"),
            state: tag("addr:state"),
            postal_code: tag("addr:postcode"),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: i64,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

// =============================================================================
// Client
// =============================================================================

/// Overpass client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    client: reqwest::Client,
    endpoint: Url,
    politeness_delay: Duration,
}

impl DiscoveryClient {
    pub fn new(config: &GeoConfig) -> GeoResult<Self> {
        Ok(DiscoveryClient {
            client: config.http_client()?,
            endpoint: Url::parse(&config.overpass_url)?,
            politeness_delay: config.politeness_delay,
        })
    }

    /// Fuel stations inside one area.
    pub async fn discover(&self, area: &SearchArea) -> GeoResult<Vec<PoiCandidate>> {
        area.validate()?;

        debug!(
            lat = area.latitude,
            lng = area.longitude,
            radius_m = area.radius_m,
            "Querying Overpass"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", area.to_query())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Overpass returned an error");
            return Err(GeoError::upstream(status.as_u16(), &body));
        }

        let payload: OverpassResponse = response.json().await?;
        let candidates: Vec<PoiCandidate> = payload
            .elements
            .into_iter()
            .filter_map(PoiCandidate::from_element)
            .collect();

        debug!(count = candidates.len(), "Overpass returned candidates");
        Ok(candidates)
    }

    /// Queries each area in order, sleeping the politeness delay between
    /// requests, and merges the results by OSM id (first seen wins).
    pub async fn discover_areas(&self, areas: &[SearchArea]) -> GeoResult<Vec<PoiCandidate>> {
        if areas.is_empty() {
            return Err(GeoError::InvalidRequest("at least one area is required".to_string()));
        }
        if areas.len() > MAX_DISCOVERY_AREAS {
            return Err(GeoError::InvalidRequest(format!(
                "at most {} areas per request",
                MAX_DISCOVERY_AREAS
            )));
        }
        for area in areas {
            area.validate()?;
        }

        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        for (i, area) in areas.iter().enumerate() {
            if i > 0 && !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }

            for candidate in self.discover(area).await? {
                if seen.insert(candidate.osm_id) {
                    merged.push(candidate);
                }
            }
        }

        info!(
            areas = areas.len(),
            candidates = merged.len(),
            "Discovery finished"
        );
        Ok(merged)
    }
}
