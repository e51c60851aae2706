use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{DateTimeParts, NormalizedTable, RawTable, TimeWindow};
use crate::processors::{
    Classification, ColumnClassifier, DatasetNormalizer, GeoResult, GeoSanitizer, TimeWindowFilter,
};
use crate::readers::CsvReader;

/// One full recomputation pass over an upload: read, classify, normalize,
/// window-filter, geo-sanitize. Each parameter change recomputes from the
/// normalized table; nothing is cached between calls.
pub struct Pipeline {
    config: PipelineConfig,
    reader: CsvReader,
    classifier: ColumnClassifier,
    normalizer: DatasetNormalizer,
    time_filter: TimeWindowFilter,
    geo_sanitizer: GeoSanitizer,
}

/// Dataset summary handed to the presentation layer after ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub raw_rows: usize,
    pub normalized_rows: usize,
    pub headers: Vec<String>,
    pub datetime_column: Option<String>,
    pub volume_columns: Vec<String>,
    pub years: Vec<i32>,
    pub datetime_min: Option<NaiveDateTime>,
    pub datetime_max: Option<NaiveDateTime>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader: CsvReader::new(&config),
            classifier: ColumnClassifier::new(&config),
            normalizer: DatasetNormalizer::new(&config),
            time_filter: TimeWindowFilter::new(&config),
            geo_sanitizer: GeoSanitizer::new(),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn load_file(&self, path: &Path) -> Result<RawTable> {
        self.reader.read_table(path)
    }

    pub fn load_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        self.reader.read_table_from_bytes(bytes)
    }

    /// Header-only role detection, reusable independently of normalization.
    pub fn classify(&self, raw: &RawTable) -> Classification {
        self.classifier.classify(raw.headers())
    }

    pub fn normalize(&self, raw: &RawTable) -> Result<NormalizedTable> {
        self.normalizer.normalize(raw)
    }

    pub fn build_window(&self, start: &DateTimeParts, end: &DateTimeParts) -> Result<TimeWindow> {
        self.time_filter.build_window(start, end)
    }

    pub fn filter(&self, table: &NormalizedTable, window: &TimeWindow) -> NormalizedTable {
        self.time_filter.filter(table, window)
    }

    pub fn sanitize_geo(&self, table: &NormalizedTable) -> GeoResult {
        self.geo_sanitizer.sanitize(table)
    }

    pub fn time_filter(&self) -> &TimeWindowFilter {
        &self.time_filter
    }

    /// Ingest a file and summarize what was detected.
    pub fn inspect(&self, path: &Path) -> Result<(NormalizedTable, DatasetReport)> {
        let raw = self.load_file(path)?;
        let classification = self.classify(&raw);
        let normalized = self.normalize(&raw)?;

        info!(
            raw_rows = raw.row_count(),
            normalized_rows = normalized.row_count(),
            datetime_column = ?classification.datetime_column,
            "dataset ingested"
        );

        let report = DatasetReport {
            raw_rows: raw.row_count(),
            normalized_rows: normalized.row_count(),
            headers: normalized.headers().to_vec(),
            datetime_column: classification.datetime_column,
            volume_columns: classification.volume_columns,
            years: self.time_filter.year_options(&normalized),
            datetime_min: normalized.timestamps().iter().min().copied(),
            datetime_max: normalized.timestamps().iter().max().copied(),
        };

        Ok((normalized, report))
    }
}
