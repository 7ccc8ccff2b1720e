//! Estimate-and-log route
//!
//! - POST /api/v1/estimates - Run the estimator on an image and log the
//!   result
//!
//! A result with `is_food_item == false` is logged at 0 kcal with the
//! detected label preserved. There is no staleness token: a finished
//! estimate is accepted whenever it is submitted.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{EstimateLogResponse, EstimateRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::MealType;

/// POST /api/v1/estimates
pub async fn estimate_and_log(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> ApiResult<(StatusCode, Json<EstimateLogResponse>)> {
    if req.image.is_empty() {
        return Err(ApiError::Validation("image payload is empty".to_string()));
    }

    let estimator = state.estimator.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("calorie estimation is not configured".to_string())
    })?;

    let estimate = estimator.estimate(&req.image).await?;

    let image_url = req.keep_image.then(|| req.image.clone());
    let meal_type = req.meal_type.as_deref().and_then(MealType::parse_selection);

    let entry = state
        .journal
        .log_estimate(estimate.clone(), image_url, meal_type, req.timestamp)?;

    Ok((
        StatusCode::CREATED,
        Json(EstimateLogResponse { estimate, entry }),
    ))
}
