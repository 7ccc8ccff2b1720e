//! Profile metrics engine
//!
//! Pure, total functions deriving health metrics from a [`UserProfile`].
//! Every function returns `None` when a required input is missing; nothing
//! here is ever persisted, only derived at read time.
//!
//! BMR uses the revised Harris-Benedict equations. There is no equation
//! variant for `Gender::Other`, so `bmr` (and everything downstream of it)
//! is `None` for that case rather than guessing an average.

use crate::model::{Gender, UserProfile};
use serde::Serialize;

/// Fallback water target when the profile has no weight, in milliliters.
pub const DEFAULT_WATER_TARGET_ML: f64 = 2000.0;

/// Basal metabolic rate in kcal/day.
///
/// Requires weight, height, age, and a binary gender; `None` otherwise.
pub fn bmr(profile: &UserProfile) -> Option<f64> {
    let weight = profile.weight_kg?;
    let height = profile.height_cm?;
    let age = profile.age? as f64;

    match profile.gender? {
        Gender::Male => Some(88.362 + 13.397 * weight + 4.799 * height - 5.677 * age),
        Gender::Female => Some(447.593 + 9.247 * weight + 3.098 * height - 4.330 * age),
        Gender::Other => None,
    }
}

/// Total daily calorie need: BMR scaled by the activity multiplier.
pub fn daily_calories(profile: &UserProfile) -> Option<f64> {
    let base = bmr(profile)?;
    let level = profile.activity_level?;
    Some(base * level.multiplier())
}

/// Body mass index from weight (kg) and height (cm).
pub fn bmi(profile: &UserProfile) -> Option<f64> {
    let weight = profile.weight_kg?;
    let height_m = profile.height_cm? / 100.0;
    Some(weight / (height_m * height_m))
}

/// Recommended daily water intake in milliliters: 35 mL per kg of body
/// weight, rounded to the nearest milliliter.
pub fn recommended_water_ml(profile: &UserProfile) -> Option<f64> {
    Some((profile.weight_kg? * 35.0).round())
}

/// The effective water target: the recommendation, or the fixed default
/// when the profile cannot provide one.
pub fn water_target(profile: &UserProfile) -> f64 {
    recommended_water_ml(profile).unwrap_or(DEFAULT_WATER_TARGET_ML)
}

/// All derived metrics for one profile snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub bmr: Option<f64>,
    pub daily_calories: Option<f64>,
    pub bmi: Option<f64>,
    pub recommended_water_ml: Option<f64>,
}

impl DerivedMetrics {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            bmr: bmr(profile),
            daily_calories: daily_calories(profile),
            bmi: bmi(profile),
            recommended_water_ml: recommended_water_ml(profile),
        }
    }
}

/// Memoized derived metrics, invalidated by the profile value itself.
///
/// Recomputes only when the observed profile differs from the one the
/// cached snapshot was derived from.
#[derive(Debug, Default)]
pub struct MetricsCache {
    cached: Option<(UserProfile, DerivedMetrics)>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics for `profile`, reusing the cached snapshot when the profile
    /// is unchanged.
    pub fn get(&mut self, profile: &UserProfile) -> DerivedMetrics {
        match &self.cached {
            Some((input, value)) if input == profile => value.clone(),
            _ => {
                let value = DerivedMetrics::from_profile(profile);
                self.cached = Some((profile.clone(), value.clone()));
                value
            }
        }
    }
}
