//! Log view routes
//!
//! - GET /api/v1/log/daily?date=YYYY-MM-DD
//! - GET /api/v1/log/monthly?year=&month=&sort=
//! - GET /api/v1/log/calendar?year=&month=

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CalendarParams, DailyViewParams, MonthlyViewParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::CalorieLogEntry;
use crate::query::{CalendarMarks, SortOrder};

/// GET /api/v1/log/daily
///
/// Entries for the anchor day, newest first (fixed ordering).
pub async fn daily_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DailyViewParams>,
) -> Json<Vec<CalorieLogEntry>> {
    Json(state.journal.daily_view(params.date))
}

/// GET /api/v1/log/monthly
pub async fn monthly_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyViewParams>,
) -> ApiResult<Json<Vec<CalorieLogEntry>>> {
    validate_month(params.month)?;

    let sort = params
        .sort
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();

    Ok(Json(state.journal.monthly_view(params.year, params.month, sort)))
}

/// GET /api/v1/log/calendar
pub async fn calendar_marks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalendarParams>,
) -> ApiResult<Json<CalendarMarks>> {
    validate_month(params.month)?;
    Ok(Json(state.journal.calendar_marks(params.year, params.month)))
}

fn validate_month(month: u32) -> ApiResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "month must be 1-12, got {}",
            month
        )))
    }
}
