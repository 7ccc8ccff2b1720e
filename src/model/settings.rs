//! Notification settings
//!
//! The model only validates; scheduling is the notify module's job.

use crate::model::ValidationError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Reminder configuration, replaced wholesale via [`SettingsUpdate`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Minutes between reminders, >= 1
    pub frequency_minutes: u32,
    /// Start of the reminder window, `HH:mm`
    pub start_time: String,
    /// End of the reminder window, `HH:mm`. A start later than the end is
    /// a window crossing midnight.
    pub end_time: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            frequency_minutes: 60,
            start_time: "09:00".to_string(),
            end_time: "21:00".to_string(),
        }
    }
}

impl NotificationSettings {
    /// The reminder window bounds. Falls back to midnight bounds if a
    /// persisted document was hand-edited into something unparsable.
    pub fn window(&self) -> (NaiveTime, NaiveTime) {
        let parse = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").ok();
        (
            parse(&self.start_time).unwrap_or(NaiveTime::MIN),
            parse(&self.end_time)
                .or_else(|| NaiveTime::from_hms_opt(23, 59, 59))
                .unwrap_or(NaiveTime::MIN),
        )
    }
}

/// Full replacement payload for the notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub enabled: bool,
    pub frequency_minutes: u32,
    pub start_time: String,
    pub end_time: String,
}

impl SettingsUpdate {
    /// Validate into committed settings, or report the failed constraint.
    pub fn validate(self) -> Result<NotificationSettings, ValidationError> {
        if self.frequency_minutes == 0 {
            return Err(ValidationError::BadFrequency);
        }

        let start_time = validate_time_of_day(&self.start_time)?;
        let end_time = validate_time_of_day(&self.end_time)?;

        Ok(NotificationSettings {
            enabled: self.enabled,
            frequency_minutes: self.frequency_minutes,
            start_time,
            end_time,
        })
    }
}

/// Validate an `HH:mm` string and return it in canonical zero-padded form.
fn validate_time_of_day(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| ValidationError::BadTimeOfDay(trimmed.to_string()))?;
    Ok(time.format("%H:%M").to_string())
}
