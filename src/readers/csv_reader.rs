use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{RawTable, Value};

/// Reads a delimited upload into a [`RawTable`].
///
/// The payload size is checked against the configured limit before any byte is
/// parsed; oversize inputs are rejected whole, never partially processed.
pub struct CsvReader {
    max_payload_bytes: u64,
}

impl CsvReader {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            max_payload_bytes: config.max_payload_bytes,
        }
    }

    pub fn with_limit(max_payload_bytes: u64) -> Self {
        Self { max_payload_bytes }
    }

    /// Read a table from a file on disk. The declared file size is checked
    /// before the file content is touched.
    pub fn read_table(&self, path: &Path) -> Result<RawTable> {
        let size = fs::metadata(path)?.len();
        if size > self.max_payload_bytes {
            return Err(ProcessingError::OversizeInput {
                size,
                limit: self.max_payload_bytes,
            });
        }

        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Read a table from an in-memory payload, e.g. an upload buffer.
    pub fn read_table_from_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        let size = bytes.len() as u64;
        if size > self.max_payload_bytes {
            return Err(ProcessingError::OversizeInput {
                size,
                limit: self.max_payload_bytes,
            });
        }
        self.parse_bytes(bytes)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        let text = decode_payload(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(Value::from_field).collect());
        }

        debug!(
            columns = headers.len(),
            rows = rows.len(),
            "parsed tabular payload"
        );

        RawTable::new(headers, rows)
    }
}

/// Decode an upload to text, falling back to Windows-1252 when the payload is
/// not valid UTF-8. Spreadsheet exports from legacy tooling are the usual
/// culprits.
fn decode_payload(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_simple_table() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "id,Timestamp,volume")?;
        writeln!(file, "1,2023-06-01 08:00:00,120")?;
        writeln!(file, "2,2023-06-01 08:05:00,95")?;

        let reader = CsvReader::with_limit(1024 * 1024);
        let table = reader.read_table(file.path())?;

        assert_eq!(table.headers(), &["id", "Timestamp", "volume"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(1, "volume"), Some(&Value::Number(95.0)));

        Ok(())
    }

    #[test]
    fn test_oversize_rejected_before_parsing() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "id,timestamp")?;
        writeln!(file, "1,2023-06-01 08:00:00")?;

        let reader = CsvReader::with_limit(4);
        let result = reader.read_table(file.path());

        assert!(matches!(
            result,
            Err(ProcessingError::OversizeInput { limit: 4, .. })
        ));

        Ok(())
    }

    #[test]
    fn test_oversize_in_memory_payload() {
        let reader = CsvReader::with_limit(8);
        let result = reader.read_table_from_bytes(b"id,timestamp\n1,2023-06-01\n");
        assert!(matches!(
            result,
            Err(ProcessingError::OversizeInput { .. })
        ));
    }

    #[test]
    fn test_ragged_rows_are_padded() -> Result<()> {
        let reader = CsvReader::with_limit(1024);
        let table = reader.read_table_from_bytes(b"a,b,c\n1,2\n4,5,6,7\n")?;

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(0, "c"), Some(&Value::Missing));
        assert_eq!(table.value(1, "c"), Some(&Value::Number(6.0)));

        Ok(())
    }

    #[test]
    fn test_missing_markers() -> Result<()> {
        let reader = CsvReader::with_limit(1024);
        let table = reader.read_table_from_bytes(b"lat,lon\nN/A,\n51.5,-0.12\n")?;

        assert_eq!(table.value(0, "lat"), Some(&Value::Missing));
        assert_eq!(table.value(0, "lon"), Some(&Value::Missing));
        assert_eq!(table.value(1, "lat"), Some(&Value::Number(51.5)));

        Ok(())
    }

    #[test]
    fn test_non_utf8_payload_decodes() -> Result<()> {
        // "Zürich" in Windows-1252: 0xFC for ü
        let payload = b"city,latitude\nZ\xFCrich,47.37\n";
        let reader = CsvReader::with_limit(1024);
        let table = reader.read_table_from_bytes(payload)?;

        assert_eq!(
            table.value(0, "city"),
            Some(&Value::Text("Zürich".to_string()))
        );

        Ok(())
    }
}
