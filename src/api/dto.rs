//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON. Stored records
//! (entries, water entries, profile, settings) serialize directly; only
//! the shapes that differ from the model live here.

use crate::collab::MealEstimate;
use crate::metrics::DerivedMetrics;
use crate::model::{CalorieLogEntry, EntryEdit, ProfileEdit, UserProfile};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// ENTRY DTOs
// ============================================

/// Manual log-entry request
#[derive(Debug, Deserialize)]
pub struct LogEntryRequest {
    /// Food label
    pub food_item: String,
    /// Calories, >= 0
    pub calories: f64,
    /// Optional instant, defaults to now
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Selection value; "none"/unknown clears the field
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Estimator confidence in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Field edits for one entry, applied as a whole-record replacement
#[derive(Debug, Deserialize)]
pub struct EditEntryRequest {
    pub edits: Vec<EntryEdit>,
}

// ============================================
// ESTIMATE DTOs
// ============================================

/// Estimate-and-log request
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    /// String-encoded image payload (data URI or base64)
    pub image: String,
    /// Selection value for the logged entry's meal type
    #[serde(default)]
    pub meal_type: Option<String>,
    /// Optional instant for the logged entry, defaults to now
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Keep the image reference on the logged entry
    #[serde(default)]
    pub keep_image: bool,
}

/// Estimate-and-log response
#[derive(Debug, Serialize)]
pub struct EstimateLogResponse {
    /// The raw estimation result
    pub estimate: MealEstimate,
    /// The entry as committed to the log
    pub entry: CalorieLogEntry,
}

// ============================================
// WATER DTOs
// ============================================

/// Add-water request
#[derive(Debug, Deserialize)]
pub struct AddWaterRequest {
    /// Milliliters, strictly positive
    pub amount_ml: f64,
    /// Optional instant, defaults to now
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Day-reset response
#[derive(Debug, Serialize)]
pub struct ResetWaterResponse {
    pub date: NaiveDate,
    pub removed: usize,
}

// ============================================
// PROFILE DTOs
// ============================================

/// Field edits for the profile
#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    pub edits: Vec<ProfileEdit>,
}

/// Profile with its derived metrics
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub metrics: DerivedMetrics,
}

// ============================================
// VIEW DTOs
// ============================================

/// Daily view query parameters
#[derive(Debug, Deserialize)]
pub struct DailyViewParams {
    /// Anchor date, `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Monthly view query parameters
#[derive(Debug, Deserialize)]
pub struct MonthlyViewParams {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// Sort criteria: time-asc, time-desc, calories-asc, calories-desc
    #[serde(default)]
    pub sort: Option<String>,
}

/// Calendar marks query parameters
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub year: i32,
    pub month: u32,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Start time (ISO 8601, `YYYY-MM-DD`, or relative like "now-30d")
    pub start: String,
    /// End time (same formats, or "now")
    pub end: String,
    /// Format: csv or json
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// SESSION DTOs
// ============================================

/// The nullable current user
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<crate::collab::UserHandle>,
}

// ============================================
// STORAGE / HEALTH DTOs
// ============================================

/// Storage banner state
#[derive(Debug, Serialize)]
pub struct StorageStatusResponse {
    /// The retained store failure, if any
    pub error: Option<String>,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Store status: ok, or the retained error
    pub store: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
