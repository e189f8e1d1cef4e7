pub mod config;
pub mod error;
pub mod types;

pub use config::RangeConfig;
pub use error::{BatchError, ConfigError, MeasurementError};
pub use types::*;
