use std::fs::File;
use std::path::Path;

use crate::error::Result;
use crate::models::NormalizedTable;

/// Materializes a (possibly filtered) normalized table back to CSV for the
/// presentation layer or further tooling.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_table(&self, table: &NormalizedTable, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        self.write_records(table, &mut writer)
    }

    pub fn write_to_string(&self, table: &NormalizedTable) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        self.write_records(table, &mut writer)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_records<W: std::io::Write>(
        &self,
        table: &NormalizedTable,
        writer: &mut csv::Writer<W>,
    ) -> Result<()> {
        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|v| v.to_field()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
