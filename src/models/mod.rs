pub mod geo;
pub mod table;
pub mod value;
pub mod window;

pub use geo::GeoPoint;
pub use table::{NormalizedTable, RawTable};
pub use value::Value;
pub use window::{DateTimeParts, TimeOfDay, TimeWindow};
