//! Address lookup through Nominatim.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tracing::debug;

use canscout_geo::{GeocodeQuery, GeocodeResult, StructuredAddress};

use crate::extract::{ApiJson, ApiQuery};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/geocode", get(geocode_query).post(geocode_body))
}

/// Free text in `address`, or any of the structured components.
#[derive(Debug, Default, Deserialize)]
struct GeocodeParams {
    address: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
}

impl GeocodeParams {
    fn into_query(self) -> GeocodeQuery {
        match self.address.filter(|a| !a.trim().is_empty()) {
            Some(address) => GeocodeQuery::FreeText(address),
            None => GeocodeQuery::Structured(StructuredAddress {
                street: self.street,
                city: self.city,
                state: self.state,
                postal_code: self.postal_code,
                country: self.country,
            }),
        }
    }
}

/// GET /api/geocode?address=...
async fn geocode_query(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GeocodeParams>,
) -> ApiResult<GeocodeResult> {
    geocode(&state, params).await
}

/// POST /api/geocode
async fn geocode_body(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<GeocodeParams>,
) -> ApiResult<GeocodeResult> {
    geocode(&state, params).await
}

async fn geocode(state: &AppState, params: GeocodeParams) -> ApiResult<GeocodeResult> {
    let query = params.into_query();
    debug!(query = %query.describe(), "Geocoding");

    let result = state.geocoder.geocode(&query).await?;
    Ok(ApiResponse::ok(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_wins() {
        let params = GeocodeParams {
            address: Some("1200 S 6th St, Springfield IL".to_string()),
            city: Some("Springfield".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), GeocodeQuery::FreeText(_)));
    }

    #[test]
    fn test_blank_address_falls_back_to_components() {
        let params = GeocodeParams {
            address: Some("  ".to_string()),
            city: Some("Springfield".to_string()),
            ..Default::default()
        };
        match params.into_query() {
            GeocodeQuery::Structured(address) => {
                assert_eq!(address.city.as_deref(), Some("Springfield"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
