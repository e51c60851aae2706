/// Canonical column names after normalization
pub const CANONICAL_DATETIME: &str = "datetime";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";

/// Default classification keywords (case-insensitive substrings)
pub const DATETIME_KEYWORDS: [&str; 4] = ["datetime", "date_time", "timestamp", "date"];
pub const VOLUME_KEYWORDS: [&str; 4] = ["traffic_volume", "volume", "traffic", "count"];

/// Ingestion limits
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 300 * 1024 * 1024; // 300 MiB

/// Time-of-day selection grid
pub const DEFAULT_TIME_STEP_MINUTES: u32 = 5;
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Coordinate bounds
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
