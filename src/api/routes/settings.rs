//! Notification settings routes
//!
//! - GET /api/v1/settings - Current settings
//! - PUT /api/v1/settings - Validate, commit, and reconfigure the scheduler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::model::{NotificationSettings, SettingsUpdate};

/// GET /api/v1/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<NotificationSettings> {
    Json(state.journal.settings())
}

/// PUT /api/v1/settings
///
/// Replaces the settings wholesale. The reminder scheduler is restarted
/// against the committed settings, never against a rejected update.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SettingsUpdate>,
) -> ApiResult<Json<NotificationSettings>> {
    let committed = state.journal.update_settings(req)?;
    state.scheduler.apply(&committed);
    Ok(Json(committed))
}
