//! Shared types used across crate-range crates.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MeasurementError;

/// Computes the weight (build-cost proxy) of a unit rooted at `path`.
pub trait UnitSizer {
    fn measure(&self, path: &Path) -> Result<u64, MeasurementError>;
}

/// An independently buildable unit, identified by the path of its root.
///
/// The weight starts unset and is filled in once per invocation by a sizer
/// (see `range-sizer`). Two units are equal when their paths are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub path: PathBuf,
    pub weight: Option<u64>,
}

impl Unit {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Unit {
            path: path.into(),
            weight: None,
        }
    }

    /// A unit whose weight is already known.
    pub fn weighted(path: impl Into<PathBuf>, weight: u64) -> Self {
        Unit {
            path: path.into(),
            weight: Some(weight),
        }
    }

    pub fn is_measured(&self) -> bool {
        self.weight.is_some()
    }

    /// Return the cached weight, measuring it with `sizer` on first access.
    pub fn weigh(&mut self, sizer: &dyn UnitSizer) -> Result<u64, MeasurementError> {
        if let Some(weight) = self.weight {
            return Ok(weight);
        }
        let weight = sizer.measure(&self.path)?;
        self.weight = Some(weight);
        Ok(weight)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Unit {}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(w) => write!(f, "{} ({w} lines)", self.path.display()),
            None => write!(f, "{} (unmeasured)", self.path.display()),
        }
    }
}

/// A half-open index range `[start, end)` over an ordered unit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRange {
    pub start: usize,
    pub end: usize,
}

impl BatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        BatchRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Arguments that select this range on the `run` subcommand.
    pub fn to_run_args(&self, batch_count: usize) -> String {
        format!("-b {batch_count} -s {} -e {}", self.start, self.end)
    }
}

impl From<BatchRange> for (usize, usize) {
    fn from(range: BatchRange) -> Self {
        (range.start, range.end)
    }
}

impl From<(usize, usize)> for BatchRange {
    fn from((start, end): (usize, usize)) -> Self {
        BatchRange { start, end }
    }
}

impl fmt::Display for BatchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSizer {
        calls: Cell<u32>,
    }

    impl UnitSizer for CountingSizer {
        fn measure(&self, path: &Path) -> Result<u64, MeasurementError> {
            self.calls.set(self.calls.get() + 1);
            if path == Path::new("missing") {
                return Err(MeasurementError::new(path, "no such directory"));
            }
            Ok(42)
        }
    }

    #[test]
    fn test_weigh_caches() {
        let sizer = CountingSizer { calls: Cell::new(0) };
        let mut unit = Unit::new("sdk/s3");

        assert_eq!(unit.weigh(&sizer).unwrap(), 42);
        assert_eq!(unit.weigh(&sizer).unwrap(), 42);
        assert_eq!(sizer.calls.get(), 1);
        assert!(unit.is_measured());
    }

    #[test]
    fn test_weigh_failure_leaves_unit_unmeasured() {
        let sizer = CountingSizer { calls: Cell::new(0) };
        let mut unit = Unit::new("missing");

        let err = unit.weigh(&sizer).unwrap_err();
        assert!(err.to_string().contains("missing"));
        assert!(!unit.is_measured());
    }

    #[test]
    fn test_unit_equality_ignores_weight() {
        assert_eq!(Unit::weighted("sdk/s3", 10), Unit::new("sdk/s3"));
        assert_ne!(Unit::new("sdk/s3"), Unit::new("sdk/ec2"));
    }

    #[test]
    fn test_run_args() {
        let range = BatchRange::new(4, 9);
        assert_eq!(range.to_run_args(3), "-b 3 -s 4 -e 9");
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Unit::weighted("a", 7).to_string(), "a (7 lines)");
        assert_eq!(BatchRange::new(0, 2).to_string(), "[0, 2)");
    }
}
