use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::Value;

/// Formats attempted for datetime-bearing text, in order. Covers ISO 8601
/// with and without seconds, slash-separated US and EU orders, and the
/// compact `YYYYMMDD` archive form.
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%Y%m%d"];

/// Unix-epoch seconds accepted from numeric cells: 1973-03-03..=5138-11-16.
/// Anything outside is treated as an ordinary measurement, not an instant.
const EPOCH_SECONDS_RANGE: std::ops::RangeInclusive<i64> = 100_000_000..=99_999_999_999;

/// Permissive datetime parsing for a single cell. Returns `None` when the
/// value cannot be read as an instant; the caller drops the row.
pub fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Text(s) => parse_datetime_str(s),
        Value::Number(n) => parse_epoch_seconds(*n),
        Value::Missing => None,
    }
}

pub fn parse_datetime_str(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    // Date-only forms resolve to midnight
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.and_hms_opt(0, 0, 0)?);
        }
    }

    // RFC 3339 with offset, normalized to the naive UTC instant
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    None
}

fn parse_epoch_seconds(n: f64) -> Option<NaiveDateTime> {
    if n.fract() != 0.0 {
        return None;
    }
    let whole = n as i64;

    // Compact YYYYMMDD cells arrive as numbers after CSV coercion
    if (19_000_101..=21_001_231).contains(&whole) {
        if let Ok(date) = NaiveDate::parse_from_str(&whole.to_string(), "%Y%m%d") {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    if !EPOCH_SECONDS_RANGE.contains(&whole) {
        return None;
    }
    DateTime::from_timestamp(whole, 0).map(|dt| dt.naive_utc())
}
