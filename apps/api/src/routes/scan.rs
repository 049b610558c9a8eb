use axum::extract::State;
use axum::routing::post;
use axum::Router;

use crate::extract::ApiJson;
use crate::response::{ApiResponse, ApiResult};
use crate::services::scan::{record_scan, ScanOutcome, ScanRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/scan", post(scan))
}

/// POST /api/scan
///
/// 201 when the scan created the inventory row, 200 when it updated one.
async fn scan(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScanRequest>,
) -> ApiResult<ScanOutcome> {
    let outcome = record_scan(&state.db, &request).await?;

    let response = if outcome.created {
        ApiResponse::created(outcome).with_message("Inventory recorded")
    } else {
        ApiResponse::ok(outcome).with_message("Inventory updated")
    };

    Ok(response)
}
