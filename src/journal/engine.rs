//! The journal engine
//!
//! Wraps the keyed store with the domain's write path. Capacity checks and
//! record lookups run *inside* the store's atomic updater with the outcome
//! captured, so read-modify-write stays race-free without a second lock.

use crate::advice;
use crate::collab::MealEstimate;
use crate::journal::error::{JournalError, JournalResult};
use crate::metrics::{DerivedMetrics, MetricsCache};
use crate::model::{
    CalorieLogEntry, EntryEdit, NotificationSettings, ProfileEdit, SettingsUpdate, UserProfile,
    ValidationError, WaterLog, WaterLogEntry, MAX_LOG_ENTRIES, MAX_WATER_ENTRIES_PER_DAY,
};
use crate::query::{self, CalendarMarks, SortOrder};
use crate::store::{
    KeyedStore, CALORIE_LOG_KEY, PROFILE_KEY, SETTINGS_KEY, WATER_LOG_KEY,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// One day of water intake, aggregated for display
#[derive(Debug, Clone, Serialize)]
pub struct WaterDaySummary {
    pub date: NaiveDate,
    pub entries: Vec<WaterLogEntry>,
    pub total_ml: f64,
    pub target_ml: f64,
    /// Fraction of the target reached, clamped to [0, 1]
    pub progress: f64,
}

/// The food/water journal engine
pub struct Journal {
    store: Arc<KeyedStore>,
    /// Fixed offset defining the local calendar day for bucketing
    offset: FixedOffset,
    metrics_cache: Mutex<MetricsCache>,
}

impl Journal {
    pub fn new(store: Arc<KeyedStore>, offset: FixedOffset) -> Self {
        Self {
            store,
            offset,
            metrics_cache: Mutex::new(MetricsCache::new()),
        }
    }

    /// The offset used for day bucketing.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    // ---- calorie log ----

    /// All entries, in insertion order.
    pub fn entries(&self) -> Vec<CalorieLogEntry> {
        self.store.get(CALORIE_LOG_KEY)
    }

    /// Append a new entry. Derives the advisory comment, enforces the
    /// capacity cap, and persists.
    pub fn log_entry(&self, mut entry: CalorieLogEntry) -> JournalResult<CalorieLogEntry> {
        validate_entry(&entry)?;
        entry.advisory =
            advice::advisory(&entry.food_item, entry.calorie_estimate, entry.meal_type);

        let committed = entry.clone();
        let mut outcome: JournalResult<CalorieLogEntry> = Ok(entry);

        self.store
            .set(CALORIE_LOG_KEY, |mut log: Vec<CalorieLogEntry>| {
                if log.len() >= MAX_LOG_ENTRIES {
                    outcome = Err(JournalError::LogFull {
                        max: MAX_LOG_ENTRIES,
                    });
                    return log;
                }
                log.push(committed);
                log
            })?;

        if let Ok(entry) = &outcome {
            tracing::info!(id = %entry.id, food = %entry.food_item, kcal = entry.calorie_estimate, "Logged entry");
        }
        outcome
    }

    /// Log a finished estimation result.
    ///
    /// A non-food result is still a valid result: the detected label is
    /// preserved and the calorie value is forced to 0.
    pub fn log_estimate(
        &self,
        estimate: MealEstimate,
        image_url: Option<String>,
        meal_type: Option<crate::model::MealType>,
        timestamp: Option<DateTime<Utc>>,
    ) -> JournalResult<CalorieLogEntry> {
        let calories = if estimate.is_food_item {
            estimate.calorie_estimate
        } else {
            0.0
        };

        let mut entry = CalorieLogEntry::new(
            estimate.food_item,
            calories,
            timestamp.unwrap_or_else(Utc::now),
        );
        entry.image_url = image_url;
        entry.meal_type = meal_type;
        entry.confidence = Some(estimate.confidence.clamp(0.0, 1.0));

        self.log_entry(entry)
    }

    /// Apply edits to one entry. The whole record is replaced after the
    /// advisory is re-derived; a rejected edit leaves the stored record
    /// untouched.
    pub fn edit_entry(&self, id: Uuid, edits: &[EntryEdit]) -> JournalResult<CalorieLogEntry> {
        let mut outcome: JournalResult<CalorieLogEntry> = Err(JournalError::EntryNotFound(id));

        self.store
            .set(CALORIE_LOG_KEY, |mut log: Vec<CalorieLogEntry>| {
                let Some(pos) = log.iter().position(|e| e.id == id) else {
                    return log;
                };

                let mut updated = log[pos].clone();
                for edit in edits {
                    if let Err(e) = edit.apply(&mut updated) {
                        outcome = Err(e.into());
                        return log;
                    }
                }

                updated.advisory = advice::advisory(
                    &updated.food_item,
                    updated.calorie_estimate,
                    updated.meal_type,
                );

                log[pos] = updated.clone();
                outcome = Ok(updated);
                log
            })?;

        outcome
    }

    /// Delete one entry by id; all other entries keep their relative order.
    pub fn delete_entry(&self, id: Uuid) -> JournalResult<()> {
        let mut outcome: JournalResult<()> = Err(JournalError::EntryNotFound(id));

        self.store
            .set(CALORIE_LOG_KEY, |mut log: Vec<CalorieLogEntry>| {
                let before = log.len();
                log.retain(|e| e.id != id);
                if log.len() < before {
                    outcome = Ok(());
                }
                log
            })?;

        outcome
    }

    // ---- water log ----

    pub fn water_log(&self) -> WaterLog {
        self.store.get(WATER_LOG_KEY)
    }

    /// Add a water entry to the timestamp's day-bucket.
    pub fn add_water(
        &self,
        amount_ml: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> JournalResult<WaterLogEntry> {
        if !amount_ml.is_finite() || amount_ml <= 0.0 {
            return Err(ValidationError::NotPositive { field: "amount" }.into());
        }

        let timestamp = timestamp.unwrap_or_else(Utc::now);
        let day = query::day_key(timestamp, self.offset);
        let entry = WaterLogEntry::new(amount_ml, timestamp);

        let committed = entry.clone();
        let mut outcome: JournalResult<WaterLogEntry> = Ok(entry);

        self.store.set(WATER_LOG_KEY, |mut log: WaterLog| {
            let filled = log.0.get(&day).map(Vec::len).unwrap_or(0);
            if filled >= MAX_WATER_ENTRIES_PER_DAY {
                outcome = Err(JournalError::DayFull {
                    day: day.clone(),
                    max: MAX_WATER_ENTRIES_PER_DAY,
                });
                return log;
            }
            log.0.entry(day.clone()).or_default().push(committed);
            log
        })?;

        outcome
    }

    /// Delete one water entry by id from a day's bucket.
    pub fn delete_water(&self, date: NaiveDate, id: Uuid) -> JournalResult<()> {
        let day = date.format("%Y-%m-%d").to_string();
        let mut outcome: JournalResult<()> = Err(JournalError::WaterEntryNotFound {
            day: day.clone(),
            id,
        });

        self.store.set(WATER_LOG_KEY, |mut log: WaterLog| {
            if log.remove(&day, id) {
                outcome = Ok(());
            }
            log
        })?;

        outcome
    }

    /// Drop a whole day's water bucket. Returns the number of entries
    /// removed (0 when the day was already empty).
    pub fn reset_water_day(&self, date: NaiveDate) -> JournalResult<usize> {
        let day = date.format("%Y-%m-%d").to_string();
        let mut removed = 0;

        self.store.set(WATER_LOG_KEY, |mut log: WaterLog| {
            removed = log.reset_day(&day);
            log
        })?;

        Ok(removed)
    }

    /// One day of water intake with total, target, and progress.
    pub fn water_day(&self, date: NaiveDate) -> WaterDaySummary {
        let log = self.water_log();
        let day = date.format("%Y-%m-%d").to_string();
        let entries = log.day(&day).to_vec();
        let total_ml = log.day_total(&day);
        let target_ml = crate::metrics::water_target(&self.profile());

        WaterDaySummary {
            date,
            entries,
            total_ml,
            target_ml,
            progress: query::water_progress(total_ml, target_ml),
        }
    }

    // ---- profile ----

    /// The stored profile, normalized back to the positive-or-absent
    /// invariant.
    pub fn profile(&self) -> UserProfile {
        self.store.get::<UserProfile>(PROFILE_KEY).normalize()
    }

    /// Apply profile edits field-by-field; a rejected edit aborts the whole
    /// update and the stored profile is unchanged.
    pub fn edit_profile(&self, edits: &[ProfileEdit]) -> JournalResult<UserProfile> {
        let mut outcome: JournalResult<UserProfile> = Ok(UserProfile::default());

        self.store.set(PROFILE_KEY, |profile: UserProfile| {
            let mut updated = profile.clone().normalize();
            for edit in edits {
                if let Err(e) = edit.apply(&mut updated) {
                    outcome = Err(e.into());
                    return profile;
                }
            }
            outcome = Ok(updated.clone());
            updated
        })?;

        outcome
    }

    /// Reset the profile to its all-absent default.
    pub fn reset_profile(&self) -> JournalResult<UserProfile> {
        self.store
            .set(PROFILE_KEY, |_: UserProfile| UserProfile::default())?;
        Ok(UserProfile::default())
    }

    /// Derived metrics for the current profile, memoized on the profile
    /// value.
    pub fn derived_metrics(&self) -> DerivedMetrics {
        let profile = self.profile();
        self.metrics_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&profile)
    }

    // ---- settings ----

    pub fn settings(&self) -> NotificationSettings {
        self.store.get(SETTINGS_KEY)
    }

    /// Validate and commit a full settings replacement.
    pub fn update_settings(&self, update: SettingsUpdate) -> JournalResult<NotificationSettings> {
        let validated = update.validate()?;
        let committed = validated.clone();

        self.store
            .set(SETTINGS_KEY, |_: NotificationSettings| committed)?;

        Ok(validated)
    }

    // ---- views ----

    /// Entries logged on the anchor day, newest first.
    pub fn daily_view(&self, anchor: NaiveDate) -> Vec<CalorieLogEntry> {
        query::daily_view(&self.entries(), anchor, self.offset)
    }

    /// Entries logged within the anchor month, ordered by `sort`.
    pub fn monthly_view(&self, year: i32, month: u32, sort: SortOrder) -> Vec<CalorieLogEntry> {
        query::monthly_view(&self.entries(), year, month, sort, self.offset)
    }

    /// Marked days of a month, for calendar display.
    pub fn calendar_marks(&self, year: i32, month: u32) -> CalendarMarks {
        query::calendar_marks(&self.entries(), &self.water_log(), year, month, self.offset)
    }

    // ---- storage banner ----

    /// The retained store failure, if any, for the persistent banner.
    pub fn storage_banner(&self) -> Option<String> {
        self.store.last_error()
    }

    /// Dismiss the storage banner.
    pub fn dismiss_storage_banner(&self) {
        self.store.dismiss_error();
    }
}

/// Record-level invariants enforced on every new entry.
fn validate_entry(entry: &CalorieLogEntry) -> Result<(), ValidationError> {
    if !entry.calorie_estimate.is_finite() {
        return Err(ValidationError::NotANumber { field: "calories" });
    }
    if entry.calorie_estimate < 0.0 {
        return Err(ValidationError::Negative { field: "calories" });
    }
    if let Some(cost) = entry.cost {
        if !cost.is_finite() || cost < 0.0 {
            return Err(ValidationError::Negative { field: "cost" });
        }
    }
    if let Some(confidence) = entry.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::OutOfRange {
                field: "confidence",
            });
        }
    }
    Ok(())
}
