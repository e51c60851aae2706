use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{NormalizedTable, RawTable, Value};
use crate::processors::ColumnClassifier;
use crate::utils::constants::CANONICAL_DATETIME;
use crate::utils::timeparse::parse_datetime;

/// Turns a raw upload into a table with a guaranteed, canonically named
/// datetime column.
///
/// Rows whose datetime cell cannot be parsed are dropped individually; the
/// whole table is rejected only when no datetime column exists or no row
/// survives parsing.
pub struct DatasetNormalizer {
    classifier: ColumnClassifier,
}

impl DatasetNormalizer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            classifier: ColumnClassifier::new(config),
        }
    }

    pub fn normalize(&self, raw: &RawTable) -> Result<NormalizedTable> {
        // Lower-case headers so downstream lookups are tie-insensitive
        let mut headers: Vec<String> =
            raw.headers().iter().map(|h| h.to_lowercase()).collect();

        let datetime_column = self
            .classifier
            .detect_datetime_column(&headers)
            .ok_or_else(|| {
                ProcessingError::Schema(
                    "no datetime column found; expected a header containing e.g. \
                     'datetime', 'date_time', 'timestamp', or 'date'"
                        .to_string(),
                )
            })?;

        let datetime_index = headers
            .iter()
            .position(|h| *h == datetime_column)
            .expect("detected column comes from the header list");

        let total = raw.row_count();
        let mut rows = Vec::with_capacity(total);
        let mut timestamps = Vec::with_capacity(total);

        for row in raw.rows() {
            match parse_datetime(&row[datetime_index]) {
                Some(ts) => {
                    let mut values = row.clone();
                    // Re-serialize the cell so the column is uniformly a timestamp
                    values[datetime_index] =
                        Value::Text(ts.format("%Y-%m-%d %H:%M:%S").to_string());
                    rows.push(values);
                    timestamps.push(ts);
                }
                None => continue,
            }
        }

        let dropped = total - rows.len();
        if dropped > 0 {
            debug!(
                column = %datetime_column,
                dropped,
                kept = rows.len(),
                "dropped rows with unparseable datetimes"
            );
        }

        if rows.is_empty() {
            warn!(column = %datetime_column, "datetime conversion produced an empty table");
            return Err(ProcessingError::Schema(format!(
                "datetime conversion failed: no value in '{}' could be parsed as a timestamp",
                datetime_column
            )));
        }

        headers[datetime_index] = CANONICAL_DATETIME.to_string();
        NormalizedTable::new(headers, rows, timestamps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> DatasetNormalizer {
        DatasetNormalizer::new(&PipelineConfig::default())
    }

    fn raw(headers: &[&str], rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(Value::from_field).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_renames_detected_column() {
        let table = raw(
            &["id", "Recorded_Timestamp", "volume"],
            vec![vec!["1", "2023-06-01 08:00:00", "120"]],
        );

        let normalized = normalizer().normalize(&table).unwrap();

        assert_eq!(normalized.headers(), &["id", "datetime", "volume"]);
        assert_eq!(normalized.row_count(), 1);
    }

    #[test]
    fn test_unparseable_rows_dropped_not_fatal() {
        let table = raw(
            &["datetime", "volume"],
            vec![
                vec!["2023-06-01 08:00:00", "120"],
                vec!["not a timestamp", "95"],
                vec!["2023-06-01 08:10:00", "88"],
            ],
        );

        let normalized = normalizer().normalize(&table).unwrap();

        assert_eq!(normalized.row_count(), 2);
        assert_eq!(normalized.timestamps().len(), 2);
        // Surviving rows keep their relative order
        assert!(normalized.timestamps()[0] < normalized.timestamps()[1]);
    }

    #[test]
    fn test_no_datetime_column_is_schema_error() {
        let table = raw(&["id", "volume"], vec![vec!["1", "120"]]);
        let result = normalizer().normalize(&table);

        match result {
            Err(ProcessingError::Schema(msg)) => assert!(msg.contains("no datetime column")),
            other => panic!("expected schema error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_all_rows_unparseable_is_schema_error() {
        let table = raw(
            &["timestamp", "volume"],
            vec![vec!["garbage", "1"], vec!["also garbage", "2"]],
        );
        let result = normalizer().normalize(&table);

        match result {
            Err(ProcessingError::Schema(msg)) => {
                assert!(msg.contains("datetime conversion failed"))
            }
            other => panic!("expected schema error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_round_trip_canonical_table() {
        let table = raw(
            &["datetime", "volume"],
            vec![
                vec!["2023-06-01 08:00:00", "120"],
                vec!["2023-06-01 08:05:00", "95"],
            ],
        );

        let normalized = normalizer().normalize(&table).unwrap();

        assert_eq!(normalized.row_count(), table.row_count());
        assert_eq!(normalized.timestamps().len(), normalized.row_count());
    }

    #[test]
    fn test_headers_lowercased_others_pass_through() {
        let table = raw(
            &["Region_ID", "DATE", "Speed"],
            vec![vec!["7", "2023-06-01", "55"]],
        );

        let normalized = normalizer().normalize(&table).unwrap();

        assert_eq!(normalized.headers(), &["region_id", "datetime", "speed"]);
        assert_eq!(normalized.value(0, "speed"), Some(&Value::Number(55.0)));
    }
}
