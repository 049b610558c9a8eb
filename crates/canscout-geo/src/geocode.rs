//! # Geocoding (Nominatim)
//!
//! Address → coordinate lookup against a Nominatim `/search` endpoint.
//!
//! ## Request Shaping
//! ```text
//! FreeText("100 Main St, Springfield IL")
//!     GET {base}/search?format=jsonv2&limit=1&q=100+Main+St%2C+Springfield+IL
//!
//! Structured { street: "100 Main St", city: "Springfield", state: "IL" }
//!     GET {base}/search?format=jsonv2&limit=1&street=...&city=...&state=IL
//! ```
//!
//! Nominatim returns a JSON array; an empty array is `GeoError::NoResults`.
//! Coordinates arrive as strings and are parsed here.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use url::Url;

use crate::config::{join_url, GeoConfig};
use crate::error::{GeoError, GeoResult};

/// Longest free-text address accepted.
pub const MAX_ADDRESS_LEN: usize = 500;

// =============================================================================
// Query Types
// =============================================================================

/// Address components for a structured search. At least one must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StructuredAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl StructuredAddress {
    /// Non-blank components as Nominatim parameter pairs.
    fn params(&self) -> Vec<(&'static str, String)> {
        [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postalcode", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v.to_string()))
        })
        .collect()
    }
}

/// What to geocode.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeQuery {
    FreeText(String),
    Structured(StructuredAddress),
}

impl GeocodeQuery {
    /// Human-readable form for logs and `NoResults` messages.
    pub fn describe(&self) -> String {
        match self {
            GeocodeQuery::FreeText(text) => text.trim().to_string(),
            GeocodeQuery::Structured(address) => address
                .params()
                .into_iter()
                .map(|(_, v)| v)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Validates the query and returns its Nominatim parameters.
    pub fn params(&self) -> GeoResult<Vec<(&'static str, String)>> {
        match self {
            GeocodeQuery::FreeText(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(GeoError::InvalidRequest("address is required".to_string()));
                }
                if text.chars().count() > MAX_ADDRESS_LEN {
                    return Err(GeoError::InvalidRequest(format!(
                        "address must be at most {} characters",
                        MAX_ADDRESS_LEN
                    )));
                }
                Ok(vec![("q", text.to_string())])
            }
            GeocodeQuery::Structured(address) => {
                let params = address.params();
                if params.is_empty() {
                    return Err(GeoError::InvalidRequest(
                        "at least one address component is required".to_string(),
                    ));
                }
                if params.iter().any(|(_, v)| v.chars().count() > MAX_ADDRESS_LEN) {
                    return Err(GeoError::InvalidRequest(format!(
                        "address components must be at most {} characters",
                        MAX_ADDRESS_LEN
                    )));
                }
                Ok(params)
            }
        }
    }
}

/// The first candidate Nominatim returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimPlace {
    fn into_result(self) -> GeoResult<GeocodeResult> {
        let latitude = self
            .lat
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Decode(format!("latitude '{}' is not a number", self.lat)))?;
        let longitude = self
            .lon
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Decode(format!("longitude '{}' is not a number", self.lon)))?;

        Ok(GeocodeResult {
            latitude,
            longitude,
            display_name: self.display_name,
        })
    }
}

// =============================================================================
// Geocoder
// =============================================================================

/// Nominatim client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    search_url: Url,
}

impl Geocoder {
    pub fn new(config: &GeoConfig) -> GeoResult<Self> {
        Ok(Geocoder {
            client: config.http_client()?,
            search_url: join_url(&config.nominatim_url, "search")?,
        })
    }

    /// Resolves `query` to its best candidate.
    ///
    /// ## Errors
    /// * `InvalidRequest` - empty or oversized query (no request is sent)
    /// * `NoResults` - provider returned an empty list
    /// * `Upstream` / `Timeout` / `Transport` / `Decode` - provider failure
    pub async fn geocode(&self, query: &GeocodeQuery) -> GeoResult<GeocodeResult> {
        let mut params = vec![("format", "jsonv2".to_string()), ("limit", "1".to_string())];
        params.extend(query.params()?);

        debug!(query = %query.describe(), "Geocoding address");

        let response = self
            .client
            .get(self.search_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Nominatim returned an error");
            return Err(GeoError::upstream(status.as_u16(), &body));
        }

        let places: Vec<NominatimPlace> = response.json().await?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeoError::NoResults(query.describe()))?;

        let result = place.into_result()?;
        debug!(
            lat = result.latitude,
            lng = result.longitude,
            "Geocoded address"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_params() {
        let query = GeocodeQuery::FreeText("  100 Main St, Springfield IL ".to_string());
        assert_eq!(
            query.params().unwrap(),
            vec![("q", "100 Main St, Springfield IL".to_string())]
        );
    }

    #[test]
    fn test_structured_params_skip_blanks() {
        let query = GeocodeQuery::Structured(StructuredAddress {
            street: Some("100 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("  ".to_string()),
            postal_code: Some("62701".to_string()),
            country: None,
        });
        assert_eq!(
            query.params().unwrap(),
            vec![
                ("street", "100 Main St".to_string()),
                ("city", "Springfield".to_string()),
                ("postalcode", "62701".to_string()),
            ]
        );
        assert_eq!(query.describe(), "100 Main St, Springfield, 62701");
    }

    #[test]
    fn test_empty_queries_are_invalid() {
        assert!(matches!(
            GeocodeQuery::FreeText("   ".to_string()).params(),
            Err(GeoError::InvalidRequest(_))
        ));
        assert!(matches!(
            GeocodeQuery::Structured(StructuredAddress::default()).params(),
            Err(GeoError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_place_with_bad_coordinates_is_decode_error() {
        let place = NominatimPlace {
            lat: "north".to_string(),
            lon: "-89.65".to_string(),
            display_name: String::new(),
        };
        assert!(matches!(place.into_result(), Err(GeoError::Decode(_))));
    }
}
