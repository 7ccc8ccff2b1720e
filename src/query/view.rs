//! Daily and monthly views over the calorie log

use crate::model::CalorieLogEntry;
use crate::query::local_date;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sort criteria for the monthly view.
///
/// The daily view is always newest-first and does not consult this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    TimeAsc,
    #[default]
    TimeDesc,
    CaloriesAsc,
    CaloriesDesc,
}

impl SortOrder {
    /// Parse a query-parameter value; unknown values fall back to the
    /// default ordering.
    pub fn parse(input: &str) -> SortOrder {
        match input.trim().to_lowercase().as_str() {
            "time-asc" => SortOrder::TimeAsc,
            "time-desc" => SortOrder::TimeDesc,
            "calories-asc" => SortOrder::CaloriesAsc,
            "calories-desc" => SortOrder::CaloriesDesc,
            _ => SortOrder::default(),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::TimeAsc => write!(f, "time-asc"),
            SortOrder::TimeDesc => write!(f, "time-desc"),
            SortOrder::CaloriesAsc => write!(f, "calories-asc"),
            SortOrder::CaloriesDesc => write!(f, "calories-desc"),
        }
    }
}

/// Entries logged on the anchor day, newest first.
pub fn daily_view(
    entries: &[CalorieLogEntry],
    anchor: NaiveDate,
    offset: FixedOffset,
) -> Vec<CalorieLogEntry> {
    let mut selected: Vec<CalorieLogEntry> = entries
        .iter()
        .filter(|e| local_date(e.timestamp, offset) == anchor)
        .cloned()
        .collect();

    selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    selected
}

/// Entries logged within the anchor month, ordered by `sort`.
pub fn monthly_view(
    entries: &[CalorieLogEntry],
    year: i32,
    month: u32,
    sort: SortOrder,
    offset: FixedOffset,
) -> Vec<CalorieLogEntry> {
    let mut selected: Vec<CalorieLogEntry> = entries
        .iter()
        .filter(|e| in_month(e.timestamp, year, month, offset))
        .cloned()
        .collect();

    sort_entries(&mut selected, sort);
    selected
}

fn in_month(timestamp: DateTime<Utc>, year: i32, month: u32, offset: FixedOffset) -> bool {
    let date = local_date(timestamp, offset);
    date.year() == year && date.month() == month
}

fn sort_entries(entries: &mut [CalorieLogEntry], sort: SortOrder) {
    match sort {
        SortOrder::TimeAsc => entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortOrder::TimeDesc => entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::CaloriesAsc => {
            entries.sort_by(|a, b| a.calorie_estimate.total_cmp(&b.calorie_estimate))
        }
        SortOrder::CaloriesDesc => {
            entries.sort_by(|a, b| b.calorie_estimate.total_cmp(&a.calorie_estimate))
        }
    }
}

/// Fraction of the daily water target reached, clamped to [0, 1].
pub fn water_progress(total_ml: f64, target_ml: f64) -> f64 {
    if target_ml <= 0.0 {
        return 0.0;
    }
    (total_ml / target_ml).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn entry_at(day: u32, hour: u32, calories: f64) -> CalorieLogEntry {
        CalorieLogEntry::new(
            "test meal",
            calories,
            Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_daily_view_newest_first() {
        let entries = vec![
            entry_at(14, 8, 300.0),
            entry_at(14, 19, 550.0),
            entry_at(15, 9, 250.0),
            entry_at(14, 13, 480.0),
        ];

        let anchor = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let view = daily_view(&entries, anchor, utc());

        assert_eq!(view.len(), 3);
        assert_eq!(view[0].calorie_estimate, 550.0);
        assert_eq!(view[1].calorie_estimate, 480.0);
        assert_eq!(view[2].calorie_estimate, 300.0);
    }

    #[test]
    fn test_monthly_view_filters_month() {
        let mut entries = vec![entry_at(1, 12, 400.0), entry_at(31, 12, 500.0)];
        entries.push(CalorieLogEntry::new(
            "april meal",
            450.0,
            Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(),
        ));

        let view = monthly_view(&entries, 2026, 3, SortOrder::TimeAsc, utc());
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].calorie_estimate, 400.0);
        assert_eq!(view[1].calorie_estimate, 500.0);
    }

    #[test]
    fn test_monthly_sort_calories_desc() {
        let entries = vec![
            entry_at(10, 8, 100.0),
            entry_at(11, 8, 500.0),
            entry_at(12, 8, 50.0),
        ];

        let view = monthly_view(&entries, 2026, 3, SortOrder::CaloriesDesc, utc());
        let calories: Vec<f64> = view.iter().map(|e| e.calorie_estimate).collect();
        assert_eq!(calories, vec![500.0, 100.0, 50.0]);
    }

    #[test]
    fn test_monthly_sort_calories_asc() {
        let entries = vec![
            entry_at(10, 8, 100.0),
            entry_at(11, 8, 500.0),
            entry_at(12, 8, 50.0),
        ];

        let view = monthly_view(&entries, 2026, 3, SortOrder::CaloriesAsc, utc());
        let calories: Vec<f64> = view.iter().map(|e| e.calorie_estimate).collect();
        assert_eq!(calories, vec![50.0, 100.0, 500.0]);
    }

    #[test]
    fn test_sort_order_parse_defaults() {
        assert_eq!(SortOrder::parse("calories-desc"), SortOrder::CaloriesDesc);
        assert_eq!(SortOrder::parse("TIME-ASC"), SortOrder::TimeAsc);
        assert_eq!(SortOrder::parse("by-vibes"), SortOrder::TimeDesc);
    }

    #[test]
    fn test_water_progress_clamps() {
        assert_eq!(water_progress(1000.0, 2000.0), 0.5);
        assert_eq!(water_progress(2500.0, 2000.0), 1.0);
        assert_eq!(water_progress(0.0, 2000.0), 0.0);
        assert_eq!(water_progress(500.0, 0.0), 0.0);
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        // 23:00 UTC on March 14th is March 15th at UTC+2.
        let entries = vec![entry_at(14, 23, 620.0)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let on_14th = daily_view(
            &entries,
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            plus_two,
        );
        let on_15th = daily_view(
            &entries,
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            plus_two,
        );

        assert!(on_14th.is_empty());
        assert_eq!(on_15th.len(), 1);
    }
}
