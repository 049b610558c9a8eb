use axum::extract::State;
use axum::routing::delete;
use axum::Router;
use tracing::info;

use canscout_core::validation::validate_uuid;

use crate::extract::ApiPath;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/inventory/{id}", delete(remove))
}

/// DELETE /api/inventory/{id}
async fn remove(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    let id = validate_uuid("id", &id)?;
    state.db.inventory().delete(id).await?;
    info!(id = %id, "Inventory row deleted");

    Ok(ApiResponse::ok(()).with_message("Inventory row deleted"))
}
