use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness and readiness of the catalog service.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers and the catalog schema is in place.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// All catalog tables exist (migrations applied).
    pub catalog_ready: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = vitrine_db::health_check(&state.pool).await.is_ok();
    let catalog_ready = db_healthy
        && vitrine_db::catalog_tables_present(&state.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Catalog schema check failed");
                false
            });

    let status = match (db_healthy, catalog_ready) {
        (true, true) => "ok",
        (true, false) => "migrating",
        _ => "degraded",
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        catalog_ready,
    })
}

/// Root-level health route, mounted outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
