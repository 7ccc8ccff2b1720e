//! Log query engine
//!
//! Read-side views over the calorie and water logs:
//! - daily view: one local calendar day, newest first (fixed)
//! - monthly view: one calendar month, configurable [`SortOrder`]
//! - water aggregation: day totals and progress toward the target
//! - calendar marks: which days of a month carry entries
//!
//! "Local" days are computed against the fixed UTC offset the journal is
//! configured with, so bucketing is deterministic regardless of where the
//! process runs.

mod calendar;
mod view;

pub use calendar::{calendar_marks, CalendarMarks};
pub use view::{daily_view, monthly_view, water_progress, SortOrder};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// The local calendar date of an instant under the given offset.
pub fn local_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// The `YYYY-MM-DD` day-key of an instant under the given offset.
pub fn day_key(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    local_date(timestamp, offset).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_key_respects_offset() {
        // 23:30 UTC on the 14th is already the 15th at UTC+2.
        let ts = Utc.with_ymd_and_hms(2026, 3, 14, 23, 30, 0).unwrap();

        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(day_key(ts, utc), "2026-03-14");
        assert_eq!(day_key(ts, plus_two), "2026-03-15");
    }
}
