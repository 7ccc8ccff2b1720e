//! User profile and its edit commands

use crate::model::{parse_optional_positive, ValidationError};
use serde::{Deserialize, Serialize};

/// Gender as used by the BMR formula selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Map a selection-control value: `"none"`/unknown clears the field.
    pub fn parse_selection(input: &str) -> Option<Gender> {
        match input.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Activity level driving the daily-calorie multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Map a selection-control value: `"none"`/unknown clears the field.
    pub fn parse_selection(input: &str) -> Option<ActivityLevel> {
        match input.trim().to_lowercase().as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    /// Multiplier applied to BMR for total daily calories.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// The singleton user profile.
///
/// Every numeric field is strictly positive or absent. The profile is
/// never deleted, only reset back to this all-`None` default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
}

impl UserProfile {
    /// Coerce out-of-range values found in persisted documents back to
    /// `None`, restoring the positive-or-absent invariant.
    pub fn normalize(mut self) -> Self {
        if self.age == Some(0) {
            self.age = None;
        }
        if !self.height_cm.map(|h| h.is_finite() && h > 0.0).unwrap_or(true) {
            self.height_cm = None;
        }
        if !self.weight_kg.map(|w| w.is_finite() && w > 0.0).unwrap_or(true) {
            self.weight_kg = None;
        }
        self
    }
}

/// A single field edit for the user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileEdit {
    /// Raw age text; empty clears, non-positive is rejected
    Age(String),
    /// Selection value; `"none"`/unknown clears the field
    Gender(String),
    HeightCm(String),
    WeightKg(String),
    ActivityLevel(String),
}

impl ProfileEdit {
    /// Apply this edit, or report why it was rejected (prior value kept).
    pub fn apply(&self, profile: &mut UserProfile) -> Result<(), ValidationError> {
        match self {
            ProfileEdit::Age(text) => {
                profile.age = parse_age(text)?;
            }
            ProfileEdit::Gender(text) => {
                profile.gender = Gender::parse_selection(text);
            }
            ProfileEdit::HeightCm(text) => {
                profile.height_cm = parse_optional_positive("height", text)?;
            }
            ProfileEdit::WeightKg(text) => {
                profile.weight_kg = parse_optional_positive("weight", text)?;
            }
            ProfileEdit::ActivityLevel(text) => {
                profile.activity_level = ActivityLevel::parse_selection(text);
            }
        }
        Ok(())
    }
}

fn parse_age(text: &str) -> Result<Option<u32>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber { field: "age" })?;

    if value <= 0 {
        return Err(ValidationError::NotPositive { field: "age" });
    }

    u32::try_from(value)
        .map(Some)
        .map_err(|_| ValidationError::NotANumber { field: "age" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Moderate.multiplier(), 1.55);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.725);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.9);
    }

    #[test]
    fn test_edit_rejects_non_positive_and_keeps_prior() {
        let mut profile = UserProfile {
            weight_kg: Some(70.0),
            ..Default::default()
        };

        let err = ProfileEdit::WeightKg("-5".to_string()).apply(&mut profile);
        assert_eq!(err, Err(ValidationError::NotPositive { field: "weight" }));
        assert_eq!(profile.weight_kg, Some(70.0));

        let err = ProfileEdit::Age("0".to_string()).apply(&mut profile);
        assert_eq!(err, Err(ValidationError::NotPositive { field: "age" }));
    }

    #[test]
    fn test_edit_empty_clears_field() {
        let mut profile = UserProfile {
            weight_kg: Some(70.0),
            age: Some(31),
            ..Default::default()
        };

        ProfileEdit::WeightKg("".to_string()).apply(&mut profile).unwrap();
        ProfileEdit::Age("  ".to_string()).apply(&mut profile).unwrap();
        assert_eq!(profile.weight_kg, None);
        assert_eq!(profile.age, None);
    }

    #[test]
    fn test_selection_edits() {
        let mut profile = UserProfile::default();

        ProfileEdit::Gender("female".to_string()).apply(&mut profile).unwrap();
        assert_eq!(profile.gender, Some(Gender::Female));

        ProfileEdit::Gender("none".to_string()).apply(&mut profile).unwrap();
        assert_eq!(profile.gender, None);

        ProfileEdit::ActivityLevel("very_active".to_string())
            .apply(&mut profile)
            .unwrap();
        assert_eq!(profile.activity_level, Some(ActivityLevel::VeryActive));

        // Unknown selections are rejected to null rather than erroring.
        ProfileEdit::ActivityLevel("olympic".to_string())
            .apply(&mut profile)
            .unwrap();
        assert_eq!(profile.activity_level, None);
    }

    #[test]
    fn test_normalize_coerces_persisted_garbage() {
        let profile = UserProfile {
            age: Some(0),
            weight_kg: Some(-3.0),
            height_cm: Some(f64::NAN),
            ..Default::default()
        }
        .normalize();

        assert_eq!(profile.age, None);
        assert_eq!(profile.weight_kg, None);
        assert_eq!(profile.height_cm, None);
    }
}
