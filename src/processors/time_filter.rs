use chrono::Datelike;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{DateTimeParts, NormalizedTable, TimeOfDay, TimeWindow};
use crate::utils::constants::MINUTES_PER_DAY;

/// Builds inclusive [start, end] windows from caller-selected parts and
/// applies them to normalized tables.
///
/// The selectable domains deliberately offer the full calendar for months and
/// days; impossible combinations surface at window construction instead of
/// being pre-filtered away.
pub struct TimeWindowFilter {
    step_minutes: u32,
}

impl TimeWindowFilter {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            step_minutes: config.time_step_minutes,
        }
    }

    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    /// Validate caller-assembled parts into a concrete window. Impossible
    /// calendar dates and reversed ranges are construction failures, never
    /// clamped.
    pub fn build_window(&self, start: &DateTimeParts, end: &DateTimeParts) -> Result<TimeWindow> {
        TimeWindow::build(start, end)
    }

    /// Inclusive sub-table of rows whose timestamp lies in the window,
    /// original order preserved. An empty result is a success.
    pub fn filter(&self, table: &NormalizedTable, window: &TimeWindow) -> NormalizedTable {
        let indices: Vec<usize> = table
            .timestamps()
            .iter()
            .enumerate()
            .filter(|(_, ts)| window.contains(**ts))
            .map(|(i, _)| i)
            .collect();

        table.select_rows(&indices)
    }

    /// Distinct calendar years present in the data, ascending. This is the
    /// only selectable domain derived from the dataset.
    pub fn year_options(&self, table: &NormalizedTable) -> Vec<i32> {
        let mut years: Vec<i32> = table.timestamps().iter().map(|ts| ts.year()).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Full calendar month domain, independent of the data.
    pub fn month_options(&self) -> Vec<u32> {
        (1..=12).collect()
    }

    /// Full calendar day domain, independent of the data.
    pub fn day_options(&self) -> Vec<u32> {
        (1..=31).collect()
    }

    /// Every time-of-day slot on the configured grid: 288 values for the
    /// default 5-minute step.
    pub fn time_options(&self) -> Vec<TimeOfDay> {
        (0..MINUTES_PER_DAY)
            .step_by(self.step_minutes as usize)
            .filter_map(|m| TimeOfDay::new(m / 60, m % 60, self.step_minutes).ok())
            .collect()
    }
}
