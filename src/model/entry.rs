//! Calorie log entries and their edit commands

use crate::model::{
    optional_text, parse_instant, parse_optional_non_negative, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The calorie log rejects new entries beyond this count.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Meal classification for a logged food event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Map a selection-control value to a meal type.
    ///
    /// The sentinel `"none"` (and empty input) clears the field; anything
    /// outside the enumerated set is likewise rejected to `None`.
    pub fn parse_selection(input: &str) -> Option<MealType> {
        match input.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
            MealType::Snack => write!(f, "snack"),
        }
    }
}

/// One logged food event
///
/// Created on a successful estimate-and-log action, mutated only through
/// whole-record replacement after [`EntryEdit`]s apply, deleted by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalorieLogEntry {
    /// Stable opaque identifier
    pub id: Uuid,
    /// Detected or user-entered food label
    pub food_item: String,
    /// Estimated calories, always >= 0
    pub calorie_estimate: f64,
    /// Data URI or external image reference
    #[serde(default)]
    pub image_url: Option<String>,
    /// Instant the meal was logged for
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub meal_type: Option<MealType>,
    #[serde(default)]
    pub location: Option<String>,
    /// Cost of the meal, non-negative when present
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Estimator confidence in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Advisory comment derived at write time; stable across later rule
    /// changes
    #[serde(default)]
    pub advisory: String,
}

impl CalorieLogEntry {
    /// Create a new entry with the required fields
    pub fn new(
        food_item: impl Into<String>,
        calorie_estimate: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            food_item: food_item.into(),
            calorie_estimate,
            image_url: None,
            timestamp,
            meal_type: None,
            location: None,
            cost: None,
            notes: None,
            confidence: None,
            advisory: String::new(),
        }
    }

    /// Builder: set meal type
    pub fn meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }

    /// Builder: set image reference
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Builder: set location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder: set cost
    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Builder: set notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder: set estimator confidence
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// A single field edit for a calorie log entry.
///
/// Each variant carries the raw payload a form submits and applies its own
/// validation; a rejected edit leaves the entry untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum EntryEdit {
    FoodItem(String),
    /// Raw calorie text; empty input means 0 (calories have no null state)
    Calories(String),
    /// Raw date/time text; invalid input keeps the previous timestamp
    Timestamp(String),
    /// Selection value; `"none"` or anything unrecognized clears the field
    MealType(String),
    Location(String),
    /// Raw cost text; empty clears, negative is rejected
    Cost(String),
    Notes(String),
    ImageUrl(String),
}

impl EntryEdit {
    /// Apply this edit to an entry, or report why it was rejected.
    pub fn apply(&self, entry: &mut CalorieLogEntry) -> Result<(), ValidationError> {
        match self {
            EntryEdit::FoodItem(text) => {
                entry.food_item = text.trim().to_string();
            }
            EntryEdit::Calories(text) => {
                entry.calorie_estimate = parse_calories(text)?;
            }
            EntryEdit::Timestamp(text) => {
                entry.timestamp = parse_instant(text)?;
            }
            EntryEdit::MealType(text) => {
                entry.meal_type = MealType::parse_selection(text);
            }
            EntryEdit::Location(text) => {
                entry.location = optional_text(text);
            }
            EntryEdit::Cost(text) => {
                entry.cost = parse_optional_non_negative("cost", text)?;
            }
            EntryEdit::Notes(text) => {
                entry.notes = optional_text(text);
            }
            EntryEdit::ImageUrl(text) => {
                entry.image_url = optional_text(text);
            }
        }
        Ok(())
    }
}

/// Parse raw calorie text. Empty input maps to 0; negative or non-numeric
/// input is rejected.
fn parse_calories(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber { field: "calories" })?;

    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field: "calories" });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field: "calories" });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> CalorieLogEntry {
        CalorieLogEntry::new(
            "grilled salmon",
            450.0,
            Utc.with_ymd_and_hms(2026, 3, 14, 12, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_meal_type_selection() {
        assert_eq!(MealType::parse_selection("Lunch"), Some(MealType::Lunch));
        assert_eq!(MealType::parse_selection("none"), None);
        assert_eq!(MealType::parse_selection(""), None);
        assert_eq!(MealType::parse_selection("brunch"), None);
    }

    #[test]
    fn test_calories_edit_empty_means_zero() {
        let mut e = entry();
        EntryEdit::Calories("".to_string()).apply(&mut e).unwrap();
        assert_eq!(e.calorie_estimate, 0.0);
    }

    #[test]
    fn test_calories_edit_rejects_negative() {
        let mut e = entry();
        let err = EntryEdit::Calories("-50".to_string()).apply(&mut e);
        assert_eq!(err, Err(ValidationError::Negative { field: "calories" }));
        // Field keeps its prior value.
        assert_eq!(e.calorie_estimate, 450.0);
    }

    #[test]
    fn test_calories_edit_rejects_text() {
        let mut e = entry();
        let err = EntryEdit::Calories("a lot".to_string()).apply(&mut e);
        assert_eq!(err, Err(ValidationError::NotANumber { field: "calories" }));
        assert_eq!(e.calorie_estimate, 450.0);
    }

    #[test]
    fn test_timestamp_edit_invalid_keeps_previous() {
        let mut e = entry();
        let before = e.timestamp;
        let err = EntryEdit::Timestamp("not a date".to_string()).apply(&mut e);
        assert!(err.is_err());
        assert_eq!(e.timestamp, before);
    }

    #[test]
    fn test_timestamp_edit_valid_replaces() {
        let mut e = entry();
        EntryEdit::Timestamp("2026-04-01T09:00:00Z".to_string())
            .apply(&mut e)
            .unwrap();
        assert_eq!(
            e.timestamp,
            Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_meal_type_edit_none_sentinel() {
        let mut e = entry().meal_type(MealType::Dinner);
        EntryEdit::MealType("none".to_string()).apply(&mut e).unwrap();
        assert_eq!(e.meal_type, None);
    }

    #[test]
    fn test_cost_edit() {
        let mut e = entry();
        EntryEdit::Cost("12.50".to_string()).apply(&mut e).unwrap();
        assert_eq!(e.cost, Some(12.5));

        EntryEdit::Cost("".to_string()).apply(&mut e).unwrap();
        assert_eq!(e.cost, None);

        let err = EntryEdit::Cost("-4".to_string()).apply(&mut e);
        assert_eq!(err, Err(ValidationError::Negative { field: "cost" }));
    }

    #[test]
    fn test_entry_serialization_round_trip() {
        let e = entry().meal_type(MealType::Lunch).cost(9.75).confidence(0.92);
        let json = serde_json::to_string(&e).unwrap();
        let restored: CalorieLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(e, restored);
    }

    #[test]
    fn test_edit_deserializes_from_tagged_json() {
        let edit: EntryEdit =
            serde_json::from_str(r#"{"field": "calories", "value": "350"}"#).unwrap();
        assert!(matches!(edit, EntryEdit::Calories(ref v) if v == "350"));
    }
}
