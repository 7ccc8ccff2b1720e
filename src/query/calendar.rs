//! Calendar marking: which days of a month carry log entries

use crate::model::{CalorieLogEntry, WaterLog};
use crate::query::local_date;
use chrono::{Datelike, FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// Marked days for one displayed month. Display-only; carries no other
/// invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarMarks {
    /// Days with at least one calorie entry
    pub meal_days: BTreeSet<NaiveDate>,
    /// Days with a non-empty water bucket
    pub water_days: BTreeSet<NaiveDate>,
}

/// Compute the marked days of a month from both logs.
pub fn calendar_marks(
    entries: &[CalorieLogEntry],
    water: &WaterLog,
    year: i32,
    month: u32,
    offset: FixedOffset,
) -> CalendarMarks {
    let meal_days = entries
        .iter()
        .map(|e| local_date(e.timestamp, offset))
        .filter(|d| d.year() == year && d.month() == month)
        .collect();

    let water_days = water
        .marked_days()
        .filter_map(|key| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
        .filter(|d| d.year() == year && d.month() == month)
        .collect();

    CalendarMarks {
        meal_days,
        water_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WaterLogEntry;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_marks_cover_both_logs() {
        let offset = FixedOffset::east_opt(0).unwrap();

        let entries = vec![
            CalorieLogEntry::new(
                "porridge",
                320.0,
                Utc.with_ymd_and_hms(2026, 3, 3, 8, 0, 0).unwrap(),
            ),
            CalorieLogEntry::new(
                "stew",
                510.0,
                Utc.with_ymd_and_hms(2026, 3, 3, 19, 0, 0).unwrap(),
            ),
            CalorieLogEntry::new(
                "off-month meal",
                400.0,
                Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap(),
            ),
        ];

        let mut water = WaterLog::default();
        water
            .0
            .entry("2026-03-07".to_string())
            .or_default()
            .push(WaterLogEntry::new(
                250.0,
                Utc.with_ymd_and_hms(2026, 3, 7, 9, 0, 0).unwrap(),
            ));

        let marks = calendar_marks(&entries, &water, 2026, 3, offset);

        assert_eq!(marks.meal_days.len(), 1);
        assert!(marks
            .meal_days
            .contains(&NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()));
        assert_eq!(marks.water_days.len(), 1);
        assert!(marks
            .water_days
            .contains(&NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()));
    }

    #[test]
    fn test_marks_recompute_after_reset() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let mut water = WaterLog::default();
        water
            .0
            .entry("2026-03-07".to_string())
            .or_default()
            .push(WaterLogEntry::new(
                250.0,
                Utc.with_ymd_and_hms(2026, 3, 7, 9, 0, 0).unwrap(),
            ));

        water.reset_day("2026-03-07");

        let marks = calendar_marks(&[], &water, 2026, 3, offset);
        assert!(marks.water_days.is_empty());
    }
}
