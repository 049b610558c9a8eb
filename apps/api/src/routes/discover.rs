use axum::extract::State;
use axum::routing::post;
use axum::Router;

use crate::extract::ApiJson;
use crate::response::{ApiResponse, ApiResult};
use crate::services::discovery::{discover, DiscoverRequest, DiscoveryReport};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/discover", post(run))
}

/// POST /api/discover
async fn run(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DiscoverRequest>,
) -> ApiResult<DiscoveryReport> {
    let report = discover(&state.db, &state.discovery, &request).await?;

    let message = if request.import {
        format!(
            "Found {}, imported {}, skipped {} duplicates",
            report.found, report.imported, report.duplicates
        )
    } else {
        format!("Found {} candidates", report.found)
    };

    Ok(ApiResponse::ok(report).with_message(message))
}
