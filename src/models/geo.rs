use serde::{Deserialize, Serialize};
use validator::Validate;

/// A plottable coordinate pair. Range rules mirror the WGS84 domain; anything
/// outside is dropped from geo output but kept for non-geo visualizations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_plottable(&self) -> bool {
        self.validate().is_ok()
    }
}
