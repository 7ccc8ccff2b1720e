//! Storage banner routes
//!
//! The store retains its most recent failure as readable state so a
//! frontend can render a persistent, dismissable banner.
//!
//! - GET    /api/v1/storage/status - Read the banner
//! - DELETE /api/v1/storage/error  - Dismiss it

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::StorageStatusResponse;
use crate::api::state::AppState;

/// GET /api/v1/storage/status
pub async fn storage_status(State(state): State<Arc<AppState>>) -> Json<StorageStatusResponse> {
    Json(StorageStatusResponse {
        error: state.journal.storage_banner(),
    })
}

/// DELETE /api/v1/storage/error
pub async fn dismiss_storage_error(State(state): State<Arc<AppState>>) -> StatusCode {
    state.journal.dismiss_storage_banner();
    StatusCode::NO_CONTENT
}
