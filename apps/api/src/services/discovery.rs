//! # Discovery and Bulk Import
//!
//! Finds fuel stations around one or more points through Overpass and,
//! when asked, imports them as locations.
//!
//! ## Import Loop
//! ```text
//! for each candidate
//!   ├── missing street/city/state/postcode ──► incomplete
//!   ├── fails location validation ───────────► failed
//!   ├── dedupe && same address+city exists ──► duplicate
//!   ├── insert error ────────────────────────► failed   (logged, loop continues)
//!   └── inserted ────────────────────────────► imported
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use canscout_core::{Location, ValidationError};
use canscout_db::Database;
use canscout_geo::{DiscoveryClient, PoiCandidate, SearchArea};

use crate::error::ApiError;

/// Radius used when a single point is given without one.
pub const DEFAULT_DISCOVERY_RADIUS_M: f64 = 5_000.0;

/// Body of `POST /api/discover`.
///
/// Either a single point (`latitude`, `longitude`, optional `radius_m`) or a
/// list of `areas`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct DiscoverRequest {
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub radius_m: Option<f64>,

    #[serde(default)]
    pub areas: Option<Vec<SearchArea>>,

    /// Insert complete candidates as locations.
    #[serde(default)]
    pub import: bool,

    /// Skip candidates whose address and city already exist.
    #[serde(default = "default_dedupe")]
    pub dedupe: bool,
}

fn default_dedupe() -> bool {
    true
}

impl DiscoverRequest {
    /// The areas to search. Range checks happen in the discovery client.
    pub fn search_areas(&self) -> Result<Vec<SearchArea>, ValidationError> {
        let single = self.latitude.is_some() || self.longitude.is_some() || self.radius_m.is_some();

        match (&self.areas, single) {
            (Some(_), true) => Err(ValidationError::invalid_format(
                "areas",
                "send either areas or a single latitude/longitude, not both",
            )),
            (Some(areas), false) => Ok(areas.clone()),
            (None, _) => match (self.latitude, self.longitude) {
                (Some(latitude), Some(longitude)) => Ok(vec![SearchArea {
                    latitude,
                    longitude,
                    radius_m: self.radius_m.unwrap_or(DEFAULT_DISCOVERY_RADIUS_M),
                }]),
                (None, _) => Err(ValidationError::required("latitude")),
                (_, None) => Err(ValidationError::required("longitude")),
            },
        }
    }
}

/// Result of a discovery run.
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export)]
pub struct DiscoveryReport {
    /// Unique candidates Overpass returned.
    pub found: usize,
    pub imported: usize,
    pub duplicates: usize,
    /// Candidates lacking a full street address.
    pub incomplete: usize,
    pub failed: usize,
    pub candidates: Vec<PoiCandidate>,
    /// Locations created by this run.
    pub locations: Vec<Location>,
}

/// Runs discovery and, if requested, the import loop.
pub async fn discover(
    db: &Database,
    client: &DiscoveryClient,
    request: &DiscoverRequest,
) -> Result<DiscoveryReport, ApiError> {
    let areas = request.search_areas()?;
    let candidates = client.discover_areas(&areas).await?;

    let mut report = DiscoveryReport {
        found: candidates.len(),
        ..Default::default()
    };

    if request.import {
        import_candidates(db, &candidates, request.dedupe, &mut report).await;
        info!(
            found = report.found,
            imported = report.imported,
            duplicates = report.duplicates,
            incomplete = report.incomplete,
            failed = report.failed,
            "Discovery import finished"
        );
    }

    report.candidates = candidates;
    Ok(report)
}

async fn import_candidates(
    db: &Database,
    candidates: &[PoiCandidate],
    dedupe: bool,
    report: &mut DiscoveryReport,
) {
    let locations = db.locations();

    for candidate in candidates {
        let Some(new_location) = candidate.to_new_location() else {
            debug!(osm_id = candidate.osm_id, "Skipping candidate without full address");
            report.incomplete += 1;
            continue;
        };

        let new_location = new_location.normalized();
        if let Err(e) = new_location.validate() {
            warn!(osm_id = candidate.osm_id, error = %e, "Candidate failed validation");
            report.failed += 1;
            continue;
        }

        if dedupe {
            match locations
                .find_by_address_city(&new_location.address, &new_location.city)
                .await
            {
                Ok(Some(existing)) => {
                    debug!(
                        osm_id = candidate.osm_id,
                        existing_id = %existing.id,
                        "Skipping duplicate location"
                    );
                    report.duplicates += 1;
                    continue;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(osm_id = candidate.osm_id, error = %e, "Duplicate check failed");
                    report.failed += 1;
                    continue;
                }
            }
        }

        match locations.insert(&new_location).await {
            Ok(location) => {
                report.imported += 1;
                report.locations.push(location);
            }
            Err(e) => {
                warn!(osm_id = candidate.osm_id, error = %e, "Failed to import candidate");
                report.failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DiscoverRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_single_point_uses_default_radius() {
        let areas = parse(r#"{"latitude":39.78,"longitude":-89.65}"#)
            .search_areas()
            .unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].radius_m, DEFAULT_DISCOVERY_RADIUS_M);
    }

    #[test]
    fn test_defaults() {
        let request = parse(r#"{"latitude":39.78,"longitude":-89.65}"#);
        assert!(!request.import);
        assert!(request.dedupe);
    }

    #[test]
    fn test_areas_list() {
        let areas = parse(
            r#"{"areas":[
                {"latitude":39.78,"longitude":-89.65,"radius_m":2000},
                {"latitude":39.80,"longitude":-89.60,"radius_m":3000}
            ]}"#,
        )
        .search_areas()
        .unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].radius_m, 3000.0);
    }

    #[test]
    fn test_areas_and_point_together_are_rejected() {
        let err = parse(r#"{"latitude":1.0,"longitude":2.0,"areas":[]}"#).search_areas();
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_point_is_rejected() {
        assert!(matches!(
            parse(r#"{"longitude":2.0}"#).search_areas(),
            Err(ValidationError::Required { field }) if field == "latitude"
        ));
        assert!(parse("{}").search_areas().is_err());
    }
}
