pub mod classifier;
pub mod geo_sanitizer;
pub mod normalizer;
pub mod pipeline;
pub mod time_filter;

pub use classifier::{Classification, ColumnClassifier};
pub use geo_sanitizer::{GeoResult, GeoRow, GeoSanitizer};
pub use normalizer::DatasetNormalizer;
pub use pipeline::{DatasetReport, Pipeline};
pub use time_filter::TimeWindowFilter;
