//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Reports database connectivity and whether a transactional unit of
/// work can currently be acquired. Always returns 200; degraded
/// dependencies show up in the body rather than the status code.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.ping().await {
        Ok(()) => "connected",
        Err(_) => "unavailable",
    };
    let transactions_supported = state.executor.transactions_supported().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        transactions_supported,
    })
}
