//! Catalog search and admin CRUD.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tracing::{debug, info};

use canscout_core::validation::{
    clamp_limit, is_barcode_query, normalize_barcode, validate_barcode, validate_search_query,
    validate_uuid,
};
use canscout_core::{
    CoreError, NewProduct, Product, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_LIST_LIMIT,
    MAX_SEARCH_LIMIT,
};

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/search", get(search))
        .route("/products/barcode/{barcode}", get(get_by_barcode))
        .route("/products/{id}", get(get_by_id).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<u32>,
    #[serde(default)]
    offset: u32,
}

/// GET /api/products/search?q=&limit=
///
/// Digit-only queries that look like a barcode try an exact lookup first.
async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Vec<Product>> {
    let query = validate_search_query(&params.q)?;
    let limit = clamp_limit(params.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);

    if is_barcode_query(&query) {
        if let Some(product) = state.db.products().get_by_barcode(&query).await? {
            debug!(barcode = %query, "Search matched a barcode");
            return Ok(ApiResponse::ok(vec![product]));
        }
    }

    let products = state.db.products().search(&query, limit).await?;
    Ok(ApiResponse::ok(products))
}

/// GET /api/products?limit=&offset=
async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Vec<Product>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let products = state.db.products().list(limit, params.offset).await?;
    Ok(ApiResponse::ok(products))
}

/// POST /api/products
async fn create(
    State(state): State<AppState>,
    ApiJson(product): ApiJson<NewProduct>,
) -> ApiResult<Product> {
    let product = product.normalized();
    product.validate()?;

    let created = state.db.products().insert(&product).await?;
    info!(id = %created.id, product = %created.label(), "Product created");

    Ok(ApiResponse::created(created).with_message("Product created"))
}

/// GET /api/products/barcode/{barcode}
async fn get_by_barcode(
    State(state): State<AppState>,
    ApiPath(barcode): ApiPath<String>,
) -> ApiResult<Product> {
    let barcode = normalize_barcode(&barcode);
    validate_barcode(&barcode)?;

    let product = state
        .db
        .products()
        .get_by_barcode(&barcode)
        .await?
        .ok_or(CoreError::BarcodeNotFound(barcode))?;

    Ok(ApiResponse::ok(product))
}

/// GET /api/products/{id}
async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Product> {
    let id = validate_uuid("id", &id)?;

    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

    Ok(ApiResponse::ok(product))
}

/// PUT /api/products/{id}
async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(product): ApiJson<NewProduct>,
) -> ApiResult<Product> {
    let id = validate_uuid("id", &id)?;
    let product = product.normalized();
    product.validate()?;

    let updated = state.db.products().update(id, &product).await?;
    info!(id = %updated.id, "Product updated");

    Ok(ApiResponse::ok(updated).with_message("Product updated"))
}

/// DELETE /api/products/{id}
///
/// Inventory rows for the product go with it.
async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    let id = validate_uuid("id", &id)?;
    state.db.products().delete(id).await?;
    info!(id = %id, "Product deleted");

    Ok(ApiResponse::ok(()).with_message("Product deleted"))
}
