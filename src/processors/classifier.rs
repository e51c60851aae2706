use serde::Serialize;

use crate::config::PipelineConfig;

/// Keyword-driven column role detection.
///
/// A pure function of (headers, keyword config): no data access, no errors.
/// Absence of a datetime column is a `None` the caller must handle.
pub struct ColumnClassifier {
    datetime_keywords: Vec<String>,
    volume_keywords: Vec<String>,
}

/// Result of scanning one header list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// First header (in original order) containing a datetime keyword.
    pub datetime_column: Option<String>,
    /// Every header containing a volume keyword, original order, no duplicates.
    pub volume_columns: Vec<String>,
}

impl ColumnClassifier {
    pub fn new(config: &PipelineConfig) -> Self {
        Self::from_keywords(
            config.datetime_keywords.clone(),
            config.volume_keywords.clone(),
        )
    }

    pub fn from_keywords(datetime_keywords: Vec<String>, volume_keywords: Vec<String>) -> Self {
        Self {
            datetime_keywords: lowercased(datetime_keywords),
            volume_keywords: lowercased(volume_keywords),
        }
    }

    pub fn classify(&self, headers: &[String]) -> Classification {
        Classification {
            datetime_column: self.detect_datetime_column(headers),
            volume_columns: self.detect_volume_columns(headers),
        }
    }

    /// First match wins, even if several headers carry datetime keywords.
    pub fn detect_datetime_column(&self, headers: &[String]) -> Option<String> {
        headers
            .iter()
            .find(|h| matches_any(h, &self.datetime_keywords))
            .cloned()
    }

    /// All matches, header order preserved.
    pub fn detect_volume_columns(&self, headers: &[String]) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for header in headers {
            if matches_any(header, &self.volume_keywords) && !columns.contains(header) {
                columns.push(header.clone());
            }
        }
        columns
    }
}

fn matches_any(header: &str, keywords: &[String]) -> bool {
    let lower = header.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

fn lowercased(keywords: Vec<String>) -> Vec<String> {
    keywords.into_iter().map(|k| k.to_lowercase()).collect()
}
