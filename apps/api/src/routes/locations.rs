//! Stores: listing, nearby search, admin CRUD and per-store inventory.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tracing::{debug, info};

use canscout_core::validation::{clamp_limit, validate_coordinate, validate_radius_m, validate_uuid};
use canscout_core::{
    Coordinate, CoreError, InventoryEntry, Location, NearbyLocation, NewLocation, ValidationError,
    DEFAULT_NEARBY_LIMIT, DEFAULT_NEARBY_RADIUS_M, MAX_NEARBY_LIMIT, MAX_NEARBY_RADIUS_M,
};

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locations", get(list).post(create))
        .route("/locations/nearby", get(nearby))
        .route("/locations/{id}", get(get_by_id).put(update).delete(remove))
        .route("/locations/{id}/inventory", get(inventory))
}

#[derive(Debug, Deserialize)]
struct NearbyParams {
    lat: Option<f64>,
    lng: Option<f64>,
    radius_m: Option<f64>,
    limit: Option<u32>,
    product_id: Option<String>,
}

/// GET /api/locations
async fn list(State(state): State<AppState>) -> ApiResult<Vec<Location>> {
    let locations = state.db.locations().list_all().await?;
    Ok(ApiResponse::ok(locations))
}

/// GET /api/locations/nearby?lat=&lng=&radius_m=&limit=&product_id=
///
/// Ordered by ascending distance. With `product_id`, only stores that have
/// the product in stock, each carrying its price.
async fn nearby(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NearbyParams>,
) -> ApiResult<Vec<NearbyLocation>> {
    let latitude = params.lat.ok_or_else(|| ValidationError::required("lat"))?;
    let longitude = params.lng.ok_or_else(|| ValidationError::required("lng"))?;
    validate_coordinate(latitude, longitude)?;

    let radius_m = validate_radius_m(
        params.radius_m.unwrap_or(DEFAULT_NEARBY_RADIUS_M),
        MAX_NEARBY_RADIUS_M,
    )?;
    let limit = clamp_limit(params.limit, DEFAULT_NEARBY_LIMIT, MAX_NEARBY_LIMIT);
    let product_id = params
        .product_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .map(|id| validate_uuid("product_id", id))
        .transpose()?;

    let results = state
        .db
        .locations()
        .nearby(Coordinate::new(latitude, longitude), radius_m, limit, product_id)
        .await?;

    debug!(count = results.len(), radius_m, "Nearby lookup");
    Ok(ApiResponse::ok(results))
}

/// POST /api/locations
async fn create(
    State(state): State<AppState>,
    ApiJson(location): ApiJson<NewLocation>,
) -> ApiResult<Location> {
    let location = location.normalized();
    location.validate()?;

    let created = state.db.locations().insert(&location).await?;
    info!(id = %created.id, name = %created.name, "Location created");

    Ok(ApiResponse::created(created).with_message("Location created"))
}

/// GET /api/locations/{id}
async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Location> {
    let id = validate_uuid("id", &id)?;

    let location = state
        .db
        .locations()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::LocationNotFound(id.to_string()))?;

    Ok(ApiResponse::ok(location))
}

/// PUT /api/locations/{id}
async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(location): ApiJson<NewLocation>,
) -> ApiResult<Location> {
    let id = validate_uuid("id", &id)?;
    let location = location.normalized();
    location.validate()?;

    let updated = state.db.locations().update(id, &location).await?;
    info!(id = %updated.id, "Location updated");

    Ok(ApiResponse::ok(updated).with_message("Location updated"))
}

/// DELETE /api/locations/{id}
async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    let id = validate_uuid("id", &id)?;
    state.db.locations().delete(id).await?;
    info!(id = %id, "Location deleted");

    Ok(ApiResponse::ok(()).with_message("Location deleted"))
}

/// GET /api/locations/{id}/inventory
async fn inventory(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Vec<InventoryEntry>> {
    let id = validate_uuid("id", &id)?;

    if state.db.locations().get_by_id(id).await?.is_none() {
        return Err(CoreError::LocationNotFound(id.to_string()).into());
    }

    let entries = state.db.inventory().list_for_location(id).await?;
    Ok(ApiResponse::ok(entries))
}
