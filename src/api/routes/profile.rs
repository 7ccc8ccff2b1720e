//! Profile routes
//!
//! - GET    /api/v1/profile - Profile with derived metrics
//! - PATCH  /api/v1/profile - Apply field edits
//! - DELETE /api/v1/profile - Reset to the all-absent default

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{EditProfileRequest, ProfileResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<Arc<AppState>>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        profile: state.journal.profile(),
        metrics: state.journal.derived_metrics(),
    })
}

/// PATCH /api/v1/profile
pub async fn edit_profile(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EditProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    if req.edits.is_empty() {
        return Err(ApiError::Validation("no edits supplied".to_string()));
    }

    let profile = state.journal.edit_profile(&req.edits)?;
    let metrics = state.journal.derived_metrics();
    Ok(Json(ProfileResponse { profile, metrics }))
}

/// DELETE /api/v1/profile
pub async fn reset_profile(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state.journal.reset_profile()?;
    let metrics = state.journal.derived_metrics();
    Ok(Json(ProfileResponse { profile, metrics }))
}
