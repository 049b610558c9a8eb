//! Liveness and database health.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tracing::warn;
use ts_rs::TS;

use canscout_db::migrations::migration_status;

use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: String,
    pub version: String,
    pub database: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /api/health
///
/// Always 200 so load balancers can tell "process up" from "database down".
async fn health(State(state): State<AppState>) -> ApiResult<HealthReport> {
    let database = state.db.health_check().await;

    let (migrations_total, migrations_applied) = if database {
        match migration_status(state.db.pool()).await {
            Ok(counts) => counts,
            Err(e) => {
                warn!(error = %e, "Failed to read migration status");
                (0, 0)
            }
        }
    } else {
        (0, 0)
    };

    Ok(ApiResponse::ok(HealthReport {
        status: if database { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        migrations_total,
        migrations_applied,
    }))
}
