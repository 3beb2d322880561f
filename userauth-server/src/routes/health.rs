//! Liveness and readiness routes.

use axum::extract::State;
use axum::Json;

use crate::models::ReadyResponse;
use crate::state::AppState;

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
    "userauth server is running"
}

/// GET /ready - Storage reachability probe.
///
/// Always 200; a storage problem is reported as a degraded status in the
/// body so probes can distinguish "up" from "serving".
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    match state.store().ping() {
        Ok(()) => Json(ReadyResponse {
            status: "ready".to_string(),
            error: None,
        }),
        Err(err) => Json(ReadyResponse {
            status: "degraded".to_string(),
            error: Some(err.to_string()),
        }),
    }
}
