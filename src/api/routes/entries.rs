//! Calorie log entry routes
//!
//! - GET    /api/v1/entries      - List all entries
//! - POST   /api/v1/entries      - Log a new entry
//! - PATCH  /api/v1/entries/:id  - Edit an entry (whole-record replace)
//! - DELETE /api/v1/entries/:id  - Delete an entry

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{EditEntryRequest, LogEntryRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::{CalorieLogEntry, MealType};

/// GET /api/v1/entries
pub async fn list_entries(State(state): State<Arc<AppState>>) -> Json<Vec<CalorieLogEntry>> {
    Json(state.journal.entries())
}

/// POST /api/v1/entries
///
/// Log a manually entered food event.
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogEntryRequest>,
) -> ApiResult<(StatusCode, Json<CalorieLogEntry>)> {
    if req.food_item.trim().is_empty() {
        return Err(ApiError::Validation("food_item cannot be empty".to_string()));
    }

    let mut entry = CalorieLogEntry::new(
        req.food_item.trim(),
        req.calories,
        req.timestamp.unwrap_or_else(Utc::now),
    );
    entry.meal_type = req.meal_type.as_deref().and_then(MealType::parse_selection);
    entry.image_url = req.image_url;
    entry.location = req.location;
    entry.cost = req.cost;
    entry.notes = req.notes;
    entry.confidence = req.confidence;

    let committed = state.journal.log_entry(entry)?;
    Ok((StatusCode::CREATED, Json(committed)))
}

/// PATCH /api/v1/entries/:id
pub async fn edit_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<EditEntryRequest>,
) -> ApiResult<Json<CalorieLogEntry>> {
    if req.edits.is_empty() {
        return Err(ApiError::Validation("no edits supplied".to_string()));
    }

    let updated = state.journal.edit_entry(id, &req.edits)?;
    Ok(Json(updated))
}

/// DELETE /api/v1/entries/:id
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.journal.delete_entry(id)?;
    Ok(StatusCode::NO_CONTENT)
}
