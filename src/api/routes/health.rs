//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the service is ready to accept traffic. The journal is
/// in-process and the store keeps serving from memory even after a write
/// failure, so readiness only exercises a read.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    let _ = state.journal.entries();
    StatusCode::OK
}

/// GET /health
///
/// Full health status. A retained store failure degrades the status
/// without making the service unhealthy: in-memory state stays
/// authoritative for the session.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let banner = state.journal.storage_banner();

    let (status, store) = match banner {
        None => ("healthy", "ok".to_string()),
        Some(error) => ("degraded", error),
    };

    Json(HealthResponse {
        status: status.to_string(),
        store,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
