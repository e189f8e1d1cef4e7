//! Error types shared by the crate-range crates.

use std::path::PathBuf;

use thiserror::Error;

/// A unit's weight could not be computed.
///
/// Fatal for the whole invocation: an unmeasured unit cannot be placed
/// deterministically.
#[derive(Debug, Error)]
#[error("failed to measure {}: {reason}", path.display())]
pub struct MeasurementError {
    pub path: PathBuf,
    pub reason: String,
}

impl MeasurementError {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        MeasurementError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while ordering units or selecting a range over them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("invalid range: start {start}, end {end} (range is malformed)")]
    InvalidRange { start: i64, end: i64 },

    #[error("range start {start} exceeds available unit count {available}")]
    RangeStartOutOfBounds { start: i64, available: usize },

    #[error("range end {end} exceeds available unit count {available}")]
    RangeEndOutOfBounds { end: i64, available: usize },

    #[error("unit has no weight: {}", .0.display())]
    Unmeasured(PathBuf),
}

impl BatchError {
    /// True for the kinds where the range refers to units that do not exist,
    /// as opposed to a malformed start/end pair.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            BatchError::RangeStartOutOfBounds { .. } | BatchError::RangeEndOutOfBounds { .. }
        )
    }

    pub fn is_range_error(&self) -> bool {
        matches!(self, BatchError::InvalidRange { .. }) || self.is_out_of_bounds()
    }
}

/// Errors loading `crate-range.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown folder {folder:?}, expected one of: {}", allowed.join(", "))]
    UnknownFolder { folder: String, allowed: Vec<String> },
}
