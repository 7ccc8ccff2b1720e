//! Export route
//!
//! - GET /api/v1/export - Export calorie log entries for backup/analysis

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::CalorieLogEntry;

/// GET /api/v1/export
///
/// Export entries whose timestamp falls in `[start, end)`, as CSV or JSON.
pub async fn export_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    let start = parse_export_timestamp(&params.start)?;
    let end = parse_export_timestamp(&params.end)?;

    if start >= end {
        return Err(ApiError::Validation("start must be before end".to_string()));
    }

    let mut entries: Vec<CalorieLogEntry> = state
        .journal
        .entries()
        .into_iter()
        .filter(|e| e.timestamp >= start && e.timestamp < end)
        .collect();
    entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let format = params.format.to_lowercase();
    let (content_type, body) = match format.as_str() {
        "json" => (
            "application/json",
            serde_json::to_string_pretty(&entries)
                .map_err(|e| ApiError::Internal(e.to_string()))?,
        ),
        _ => ("text/csv", format_csv(&entries)?),
    };

    let filename = format!(
        "nutrilog_export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        if format == "json" { "json" } else { "csv" }
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                &format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Parse an export bound: RFC 3339, `YYYY-MM-DD`, "now", or relative
/// "now-<n><unit>" with unit h/d/w/m.
fn parse_export_timestamp(s: &str) -> ApiResult<DateTime<Utc>> {
    let s = s.trim();

    if s.starts_with("now") {
        let now = Utc::now();
        if s == "now" {
            return Ok(now);
        }

        let re = regex::Regex::new(r"^now-(\d+)([hdwm])$")
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        if let Some(caps) = re.captures(s) {
            let amount: i64 = caps[1]
                .parse()
                .map_err(|_| ApiError::Validation(format!("Invalid relative time: {}", s)))?;
            let duration = match &caps[2] {
                "h" => Duration::hours(amount),
                "d" => Duration::days(amount),
                "w" => Duration::weeks(amount),
                "m" => Duration::days(amount * 30),
                _ => return Err(ApiError::Validation(format!("Invalid time unit in: {}", s))),
            };
            return Ok(now - duration);
        }

        return Err(ApiError::Validation(format!(
            "Invalid relative time: {} (use now-7d, now-24h, ...)",
            s
        )));
    }

    crate::model::parse_instant(s)
        .map_err(|e| ApiError::Validation(e.to_string()))
}

fn format_csv(entries: &[CalorieLogEntry]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "id",
            "timestamp",
            "food_item",
            "calories",
            "meal_type",
            "location",
            "cost",
            "notes",
            "confidence",
            "advisory",
        ])
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    for entry in entries {
        writer
            .write_record([
                entry.id.to_string(),
                entry.timestamp.to_rfc3339(),
                entry.food_item.clone(),
                format!("{}", entry.calorie_estimate),
                entry.meal_type.map(|m| m.to_string()).unwrap_or_default(),
                entry.location.clone().unwrap_or_default(),
                entry.cost.map(|c| format!("{:.2}", c)).unwrap_or_default(),
                entry.notes.clone().unwrap_or_default(),
                entry
                    .confidence
                    .map(|c| format!("{:.2}", c))
                    .unwrap_or_default(),
                entry.advisory.clone(),
            ])
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_absolute_bounds() {
        let ts = parse_export_timestamp("2026-03-14T00:00:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());

        let ts = parse_export_timestamp("2026-03-14").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_relative_bounds() {
        let now = Utc::now();
        let week_ago = parse_export_timestamp("now-7d").unwrap();
        let diff = now - week_ago;
        assert!((diff - Duration::days(7)).num_seconds().abs() <= 1);

        assert!(parse_export_timestamp("now-7q").is_err());
        assert!(parse_export_timestamp("later").is_err());
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let entry = CalorieLogEntry::new(
            "bento box",
            520.0,
            Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
        );
        let csv = format_csv(&[entry]).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,timestamp,food_item"));
        assert!(lines.next().unwrap().contains("bento box"));
    }
}
