//! Water intake log: entries grouped into calendar-day buckets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A day-bucket rejects additions beyond this count.
pub const MAX_WATER_ENTRIES_PER_DAY: usize = 50;

/// One water-intake event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Milliliters, strictly positive
    pub amount_ml: f64,
}

impl WaterLogEntry {
    pub fn new(amount_ml: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            amount_ml,
        }
    }
}

/// Water entries grouped by local calendar day.
///
/// Keys are `YYYY-MM-DD` day-keys; each bucket is ordered by insertion.
/// The map stays sorted by day, which gives calendar iteration for free.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WaterLog(pub BTreeMap<String, Vec<WaterLogEntry>>);

impl WaterLog {
    /// Entries for a day, empty when none were logged.
    pub fn day(&self, day_key: &str) -> &[WaterLogEntry] {
        self.0.get(day_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of amounts over a day's bucket, in milliliters.
    pub fn day_total(&self, day_key: &str) -> f64 {
        self.day(day_key).iter().map(|e| e.amount_ml).sum()
    }

    /// Remove one entry by id from a day's bucket. Returns whether an
    /// entry was removed. An emptied bucket is dropped from the map so the
    /// day no longer counts as marked.
    pub fn remove(&mut self, day_key: &str, id: Uuid) -> bool {
        let Some(bucket) = self.0.get_mut(day_key) else {
            return false;
        };

        let before = bucket.len();
        bucket.retain(|e| e.id != id);
        let removed = bucket.len() < before;

        if bucket.is_empty() {
            self.0.remove(day_key);
        }
        removed
    }

    /// Drop a whole day's bucket. Returns the number of entries removed.
    pub fn reset_day(&mut self, day_key: &str) -> usize {
        self.0.remove(day_key).map(|b| b.len()).unwrap_or(0)
    }

    /// Day-keys with at least one entry, in calendar order.
    pub fn marked_days(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_day_total_sums_amounts() {
        let mut log = WaterLog::default();
        let bucket = log.0.entry("2026-03-14".to_string()).or_default();
        bucket.push(WaterLogEntry::new(250.0, at(8)));
        bucket.push(WaterLogEntry::new(330.0, at(11)));
        bucket.push(WaterLogEntry::new(500.0, at(15)));

        assert_eq!(log.day_total("2026-03-14"), 1080.0);
        assert_eq!(log.day_total("2026-03-15"), 0.0);
    }

    #[test]
    fn test_remove_by_id_leaves_others_in_order() {
        let mut log = WaterLog::default();
        let first = WaterLogEntry::new(250.0, at(8));
        let second = WaterLogEntry::new(330.0, at(11));
        let third = WaterLogEntry::new(500.0, at(15));
        let victim = second.id;

        let bucket = log.0.entry("2026-03-14".to_string()).or_default();
        bucket.extend([first.clone(), second, third.clone()]);

        assert!(log.remove("2026-03-14", victim));
        assert_eq!(log.day("2026-03-14"), &[first, third]);
        assert!(!log.remove("2026-03-14", victim));
    }

    #[test]
    fn test_emptied_bucket_unmarks_day() {
        let mut log = WaterLog::default();
        let entry = WaterLogEntry::new(250.0, at(8));
        let id = entry.id;
        log.0.entry("2026-03-14".to_string()).or_default().push(entry);

        assert_eq!(log.marked_days().count(), 1);
        assert!(log.remove("2026-03-14", id));
        assert_eq!(log.marked_days().count(), 0);
    }

    #[test]
    fn test_reset_day() {
        let mut log = WaterLog::default();
        let bucket = log.0.entry("2026-03-14".to_string()).or_default();
        bucket.push(WaterLogEntry::new(250.0, at(8)));
        bucket.push(WaterLogEntry::new(330.0, at(11)));

        assert_eq!(log.reset_day("2026-03-14"), 2);
        assert_eq!(log.day_total("2026-03-14"), 0.0);
        assert_eq!(log.reset_day("2026-03-14"), 0);
    }
}
