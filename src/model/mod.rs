//! Record model and field validation
//!
//! Defines the four persisted record kinds and the validation that stands
//! between user-supplied field edits and the store:
//! - [`CalorieLogEntry`]: one logged food event, edited through [`EntryEdit`]
//! - [`WaterLogEntry`] / [`WaterLog`]: water intake grouped into day-buckets
//! - [`UserProfile`]: the singleton profile, edited through [`ProfileEdit`]
//! - [`NotificationSettings`]: reminder configuration, replaced wholesale
//!   through [`SettingsUpdate`]
//!
//! Every edit is a tagged variant carrying the raw payload a form would
//! submit, validated by the variant itself. A rejected edit leaves the
//! target field untouched and reports which constraint failed.

mod entry;
mod profile;
mod settings;
mod water;

pub use entry::{CalorieLogEntry, EntryEdit, MealType, MAX_LOG_ENTRIES};
pub use profile::{ActivityLevel, Gender, ProfileEdit, UserProfile};
pub use settings::{NotificationSettings, SettingsUpdate};
pub use water::{WaterLog, WaterLogEntry, MAX_WATER_ENTRIES_PER_DAY};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// A rejected field edit. The field keeps its prior value; the message
/// names the constraint that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} must be between 0 and 1")]
    OutOfRange { field: &'static str },

    #[error("'{0}' is not a valid date/time")]
    BadTimestamp(String),

    #[error("'{0}' is not a valid HH:mm time of day")]
    BadTimeOfDay(String),

    #[error("reminder frequency must be at least one minute")]
    BadFrequency,
}

/// Parse a numeric form field that maps empty input to `None` and requires
/// strictly positive values otherwise.
pub(crate) fn parse_optional_positive(
    field: &'static str,
    text: &str,
) -> Result<Option<f64>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber { field })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }

    Ok(Some(value))
}

/// Parse a numeric form field that maps empty input to `None` and allows
/// zero but not negative values.
pub(crate) fn parse_optional_non_negative(
    field: &'static str,
    text: &str,
) -> Result<Option<f64>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber { field })?;

    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }

    Ok(Some(value))
}

/// Parse a user-entered date/time into an absolute instant.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, and bare `YYYY-MM-DD`
/// (midnight). Values without an explicit offset are taken as UTC, so the
/// stored timestamp is always an unambiguous instant.
pub(crate) fn parse_instant(text: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
    {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }

    Err(ValidationError::BadTimestamp(trimmed.to_string()))
}

/// Map a selection-control value to an optional string field: empty input
/// clears the field.
pub(crate) fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
