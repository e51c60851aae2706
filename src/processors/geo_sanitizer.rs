use tracing::debug;
use validator::Validate;

use crate::models::{GeoPoint, NormalizedTable};
use crate::utils::constants::{LATITUDE_COLUMN, LONGITUDE_COLUMN};

/// Outcome of geo sanitization. `MissingColumns` and `NoValidPoints` are
/// distinct on purpose: callers present different messages for "this dataset
/// has no coordinates" and "the coordinates are all unusable".
#[derive(Debug, Clone, PartialEq)]
pub enum GeoResult {
    /// Surviving rows as (row index into the input table, coordinate pair).
    Points(Vec<GeoRow>),
    /// The latitude and/or longitude column is absent.
    MissingColumns,
    /// Both columns exist but no row passed coercion and range validation.
    NoValidPoints,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRow {
    pub row: usize,
    pub point: GeoPoint,
}

/// Validates and coerces latitude/longitude pairs for point plotting.
///
/// Rows dropped here stay in the time-filtered table; they are only excluded
/// from geo output.
pub struct GeoSanitizer;

impl GeoSanitizer {
    pub fn new() -> Self {
        Self
    }

    pub fn sanitize(&self, table: &NormalizedTable) -> GeoResult {
        let (lat_index, lon_index) = match (
            table.column_index(LATITUDE_COLUMN),
            table.column_index(LONGITUDE_COLUMN),
        ) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return GeoResult::MissingColumns,
        };

        let mut points = Vec::new();
        for (row, values) in table.rows().iter().enumerate() {
            let (lat, lon) = match (
                values[lat_index].as_number(),
                values[lon_index].as_number(),
            ) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => continue,
            };

            let point = GeoPoint::new(lat, lon);
            if point.validate().is_err() {
                continue;
            }

            points.push(GeoRow { row, point });
        }

        if points.is_empty() {
            debug!(rows = table.row_count(), "no row survived geo sanitization");
            return GeoResult::NoValidPoints;
        }

        GeoResult::Points(points)
    }
}

impl Default for GeoSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
