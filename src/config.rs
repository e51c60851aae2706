use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DATETIME_KEYWORDS, DEFAULT_MAX_PAYLOAD_BYTES, DEFAULT_TIME_STEP_MINUTES, VOLUME_KEYWORDS,
};

/// Configuration for one pipeline instance.
///
/// Passed explicitly into the pipeline entry point; there is no process-wide
/// mutable configuration. The keyword lists drive column classification and can
/// be extended for datasets outside the traffic domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum accepted payload size in bytes. Inputs above this are rejected
    /// before any parsing begins.
    pub max_payload_bytes: u64,

    /// Granularity of the time-of-day selection grid, in minutes.
    pub time_step_minutes: u32,

    /// Substrings identifying the datetime column (case-insensitive).
    pub datetime_keywords: Vec<String>,

    /// Substrings identifying measurement-candidate columns (case-insensitive).
    pub volume_keywords: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            time_step_minutes: DEFAULT_TIME_STEP_MINUTES,
            datetime_keywords: DATETIME_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            volume_keywords: VOLUME_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML/JSON/YAML file, falling back to defaults
    /// for any field the file omits.
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| ProcessingError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_payload_bytes == 0 {
            return Err(ProcessingError::Config(
                "max_payload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.time_step_minutes == 0 || 60 % self.time_step_minutes != 0 {
            return Err(ProcessingError::Config(format!(
                "time_step_minutes must divide 60, got {}",
                self.time_step_minutes
            )));
        }
        if self.datetime_keywords.is_empty() {
            return Err(ProcessingError::Config(
                "datetime_keywords must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
