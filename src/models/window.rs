use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProcessingError, Result};

/// A time of day constrained to the selection grid (default 5-minute steps,
/// 288 slots across a 24-hour clock). The constraint bounds the UI selection
/// space; it is not a property of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, step_minutes: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ProcessingError::InvalidTime(format!(
                "{:02}:{:02}:00 is not a valid clock time",
                hour, minute
            )));
        }
        if step_minutes == 0 || minute % step_minutes != 0 {
            return Err(ProcessingError::InvalidTime(format!(
                "{:02}:{:02}:00 is not on the {}-minute grid",
                hour, minute, step_minutes
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0 }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        // Fields are range-checked at construction
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hour, self.minute)
    }
}

/// The (year, month, day, time) tuple a caller assembles from the selectable
/// domains before asking for a window. Calendar validity is checked at window
/// construction, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: TimeOfDay,
}

impl DateTimeParts {
    pub fn new(year: i32, month: u32, day: u32, time: TimeOfDay) -> Self {
        Self {
            year,
            month,
            day,
            time,
        }
    }

    /// Resolve to a concrete instant, failing on impossible calendar dates
    /// (e.g. April 31, or February 29 outside a leap year).
    pub fn resolve(&self) -> Result<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(
            ProcessingError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            },
        )?;
        Ok(date.and_time(self.time.as_naive_time()))
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` (or `T`-separated, or date-only) string
    /// into parts, validating the time against the slot grid.
    pub fn parse(input: &str, step_minutes: u32) -> Result<Self> {
        let trimmed = input.trim();
        let (date_part, time_part) = match trimmed.split_once(|c| c == 'T' || c == ' ') {
            Some((d, t)) => (d, Some(t)),
            None => (trimmed, None),
        };

        let mut date_fields = date_part.split('-');
        let (year, month, day) = match (
            date_fields.next().and_then(|s| s.parse::<i32>().ok()),
            date_fields.next().and_then(|s| s.parse::<u32>().ok()),
            date_fields.next().and_then(|s| s.parse::<u32>().ok()),
        ) {
            (Some(y), Some(m), Some(d)) if date_fields.next().is_none() => (y, m, d),
            _ => {
                return Err(ProcessingError::InvalidFormat(format!(
                    "expected YYYY-MM-DD[ HH:MM[:SS]], got '{}'",
                    input
                )))
            }
        };

        let time = match time_part {
            Some(t) => {
                let mut fields = t.split(':');
                let hour = fields.next().and_then(|s| s.parse::<u32>().ok());
                let minute = fields.next().and_then(|s| s.parse::<u32>().ok());
                let second = fields.next().map(|s| s.parse::<u32>().ok());
                match (hour, minute, second) {
                    (Some(h), Some(m), None | Some(Some(0))) => {
                        TimeOfDay::new(h, m, step_minutes)?
                    }
                    _ => {
                        return Err(ProcessingError::InvalidTime(format!(
                            "expected HH:MM[:00], got '{}'",
                            t
                        )))
                    }
                }
            }
            None => TimeOfDay::midnight(),
        };

        Ok(Self::new(year, month, day, time))
    }
}

/// An inclusive [start, end] instant range. Construction guarantees
/// `start <= end` and both endpoints on real calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    pub fn build(start: &DateTimeParts, end: &DateTimeParts) -> Result<Self> {
        let start = start.resolve()?;
        let end = end.resolve()?;

        if start > end {
            return Err(ProcessingError::InvalidWindow(format!(
                "start {} is after end {}",
                start, end
            )));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(year: i32, month: u32, day: u32) -> DateTimeParts {
        DateTimeParts::new(year, month, day, TimeOfDay::midnight())
    }

    #[test]
    fn test_time_of_day_grid() {
        assert!(TimeOfDay::new(0, 0, 5).is_ok());
        assert!(TimeOfDay::new(23, 55, 5).is_ok());
        assert!(TimeOfDay::new(12, 3, 5).is_err()); // Off the grid
        assert!(TimeOfDay::new(24, 0, 5).is_err());
        assert_eq!(TimeOfDay::new(9, 30, 5).unwrap().to_string(), "09:30:00");
    }

    #[test]
    fn test_impossible_dates_fail() {
        // April has 30 days
        assert!(matches!(
            parts(2023, 4, 31).resolve(),
            Err(ProcessingError::InvalidDate { .. })
        ));
        // 2024 is a leap year, 2023 is not
        assert!(parts(2024, 2, 29).resolve().is_ok());
        assert!(parts(2023, 2, 29).resolve().is_err());
    }

    #[test]
    fn test_reversed_window_fails() {
        let result = TimeWindow::build(&parts(2023, 6, 2), &parts(2023, 6, 1));
        assert!(matches!(result, Err(ProcessingError::InvalidWindow(_))));
    }

    #[test]
    fn test_window_is_inclusive() {
        let window = TimeWindow::build(&parts(2023, 6, 1), &parts(2023, 6, 2)).unwrap();

        assert!(window.contains(window.start()));
        assert!(window.contains(window.end()));
        assert!(!window.contains(window.end() + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_parse_parts() {
        let p = DateTimeParts::parse("2023-06-01 08:05:00", 5).unwrap();
        assert_eq!((p.year, p.month, p.day), (2023, 6, 1));
        assert_eq!(p.time.to_string(), "08:05:00");

        // T separator and date-only forms
        assert!(DateTimeParts::parse("2023-06-01T08:05", 5).is_ok());
        let midnight = DateTimeParts::parse("2023-06-01", 5).unwrap();
        assert_eq!(midnight.time, TimeOfDay::midnight());

        // Off-grid minutes and garbage are rejected
        assert!(DateTimeParts::parse("2023-06-01 08:07:00", 5).is_err());
        assert!(DateTimeParts::parse("June 1st", 5).is_err());
    }
}
