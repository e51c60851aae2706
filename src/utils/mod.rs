pub mod constants;
pub mod progress;
pub mod timeparse;

pub use constants::*;
pub use progress::StageReporter;
pub use timeparse::{parse_datetime, parse_datetime_str};
