use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::Value;
use crate::utils::constants::CANONICAL_DATETIME;

/// An uploaded table exactly as parsed: ordered headers, ordered rows.
///
/// Immutable once constructed; all downstream tables are derived copies.
/// Column lookup is case-insensitive but header case is preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RawTable {
    /// Build a table from headers and rows. Rows are padded with `Missing` or
    /// truncated to the header width, so ragged CSV lines stay addressable.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Value>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(ProcessingError::InvalidFormat(
                "table has no header row".to_string(),
            ));
        }

        let width = headers.len();
        for row in &mut rows {
            row.resize(width, Value::Missing);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }
}

/// A table that passed normalization: headers are lower-cased, exactly one
/// column carries the canonical `"datetime"` name, and every row has a parsed
/// timestamp alongside its original values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedTable {
    headers: Vec<String>,
    datetime_index: usize,
    rows: Vec<Vec<Value>>,
    timestamps: Vec<NaiveDateTime>,
}

impl NormalizedTable {
    pub fn new(
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
        timestamps: Vec<NaiveDateTime>,
    ) -> Result<Self> {
        let datetime_index = headers
            .iter()
            .position(|h| h == CANONICAL_DATETIME)
            .ok_or_else(|| {
                ProcessingError::Schema(format!(
                    "normalized table must contain a '{}' column",
                    CANONICAL_DATETIME
                ))
            })?;

        if rows.len() != timestamps.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "row/timestamp length mismatch: {} rows, {} timestamps",
                rows.len(),
                timestamps.len()
            )));
        }

        Ok(Self {
            headers,
            datetime_index,
            rows,
            timestamps,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Parsed timestamp per row, parallel to `rows()`.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn datetime_index(&self) -> usize {
        self.datetime_index
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Derive a table containing only the given row indices, in order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            headers: self.headers.clone(),
            datetime_index: self.datetime_index,
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            timestamps: indices.iter().map(|&i| self.timestamps[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_raw_table_pads_ragged_rows() {
        let table = RawTable::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![Value::Number(1.0)], vec![]],
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(0, "b"), Some(&Value::Missing));
        assert_eq!(table.value(1, "c"), Some(&Value::Missing));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let table = RawTable::new(
            vec!["Region_ID".to_string(), "Latitude".to_string()],
            vec![vec![Value::Number(7.0), Value::Number(51.5)]],
        )
        .unwrap();

        assert_eq!(table.column_index("region_id"), Some(0));
        assert_eq!(table.column_index("LATITUDE"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        // Display case is preserved
        assert_eq!(table.headers()[0], "Region_ID");
    }

    #[test]
    fn test_empty_headers_rejected() {
        assert!(RawTable::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_normalized_table_requires_canonical_column() {
        let result = NormalizedTable::new(
            vec!["id".to_string(), "when".to_string()],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(ProcessingError::Schema(_))));
    }

    #[test]
    fn test_select_rows_preserves_order() {
        let table = NormalizedTable::new(
            vec!["datetime".to_string(), "volume".to_string()],
            vec![
                vec![Value::Text("2023-01-01 00:00:00".to_string()), Value::Number(1.0)],
                vec![Value::Text("2023-01-02 00:00:00".to_string()), Value::Number(2.0)],
                vec![Value::Text("2023-01-03 00:00:00".to_string()), Value::Number(3.0)],
            ],
            vec![
                ts("2023-01-01 00:00:00"),
                ts("2023-01-02 00:00:00"),
                ts("2023-01-03 00:00:00"),
            ],
        )
        .unwrap();

        let subset = table.select_rows(&[0, 2]);

        assert_eq!(subset.row_count(), 2);
        assert_eq!(
            subset.timestamps()[1].date(),
            NaiveDate::from_ymd_opt(2023, 1, 3).unwrap()
        );
        assert_eq!(subset.value(1, "volume"), Some(&Value::Number(3.0)));
    }
}
