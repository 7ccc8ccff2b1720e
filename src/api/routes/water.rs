//! Water log routes
//!
//! - POST   /api/v1/water           - Add a water entry
//! - GET    /api/v1/water/:date     - Day summary (entries, total, progress)
//! - DELETE /api/v1/water/:date     - Reset the day's bucket
//! - DELETE /api/v1/water/:date/:id - Delete one entry

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{AddWaterRequest, ResetWaterResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::journal::WaterDaySummary;
use crate::model::WaterLogEntry;

/// POST /api/v1/water
pub async fn add_water(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddWaterRequest>,
) -> ApiResult<(StatusCode, Json<WaterLogEntry>)> {
    let entry = state.journal.add_water(req.amount_ml, req.timestamp)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/water/:date
pub async fn water_day(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> Json<WaterDaySummary> {
    Json(state.journal.water_day(date))
}

/// DELETE /api/v1/water/:date
pub async fn reset_water_day(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<ResetWaterResponse>> {
    let removed = state.journal.reset_water_day(date)?;
    Ok(Json(ResetWaterResponse { date, removed }))
}

/// DELETE /api/v1/water/:date/:id
pub async fn delete_water(
    State(state): State<Arc<AppState>>,
    Path((date, id)): Path<(NaiveDate, Uuid)>,
) -> ApiResult<StatusCode> {
    state.journal.delete_water(date, id)?;
    Ok(StatusCode::NO_CONTENT)
}
