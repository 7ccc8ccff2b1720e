//! Session routes
//!
//! - GET  /api/v1/session - The nullable current user
//! - POST /api/v1/session - Record a sign-in against the profile directory
//!
//! The engine performs no authentication itself; it reacts to the presence
//! or absence of a user. The identity provider hands a finished user handle
//! to the POST endpoint, which upserts the remote profile-seed record and
//! refreshes its last-seen timestamp. Failures are transient notices and
//! never touch local log state.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::SessionResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::collab::{SignInReceipt, UserHandle};

/// GET /api/v1/session
pub async fn current_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let user = state
        .identity
        .as_ref()
        .and_then(|provider| provider.current_user());

    Json(SessionResponse { user })
}

/// POST /api/v1/session
pub async fn record_sign_in(
    State(state): State<Arc<AppState>>,
    Json(user): Json<UserHandle>,
) -> ApiResult<Json<SignInReceipt>> {
    if user.id.trim().is_empty() {
        return Err(ApiError::Validation("user id cannot be empty".to_string()));
    }

    let directory = state.directory.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("profile directory is not configured".to_string())
    })?;

    let receipt = directory.record_sign_in(&user).await?;

    tracing::info!(user_id = %receipt.user_id, created = receipt.created, "Recorded sign-in");
    Ok(Json(receipt))
}
