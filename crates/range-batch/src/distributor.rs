//! Weighted distributor: stripes units across batches by weight.
//!
//! Given units sorted heaviest first, bucket `i` receives units
//! `i, i + n, i + 2n, …` for `n` batches. Concatenating the buckets gives a
//! flat order in which every contiguous batch range mixes heavy and light
//! units.
//!
//! The result must be identical for identical input, so ties keep their
//! input order (stable sort) and nothing is randomized.

use std::num::NonZeroUsize;

use range_core::{BatchError, Unit};
use tracing::debug;

use crate::partition::calculate_batches;

/// Reorder `units` so contiguous batches carry comparable total weight.
///
/// Every unit must already be weighed; the result is a permutation of the
/// input.
pub fn organize(units: Vec<Unit>, batch_count: NonZeroUsize) -> Result<Vec<Unit>, BatchError> {
    let mut weighted = Vec::with_capacity(units.len());
    for unit in units {
        let weight = unit
            .weight
            .ok_or_else(|| BatchError::Unmeasured(unit.path.clone()))?;
        weighted.push((weight, unit));
    }

    // `sort_by` is stable: equal weights keep discovery order.
    weighted.sort_by(|a, b| b.0.cmp(&a.0));

    let mut buckets: Vec<Vec<Unit>> = (0..batch_count.get()).map(|_| Vec::new()).collect();
    for (index, (_, unit)) in weighted.into_iter().enumerate() {
        buckets[index % batch_count.get()].push(unit);
    }

    for (bucket, units) in buckets.iter().enumerate() {
        let weight: u64 = units.iter().filter_map(|u| u.weight).sum();
        debug!(bucket, units = units.len(), weight, "striped bucket");
    }

    Ok(buckets.into_iter().flatten().collect())
}

/// Total weight of each contiguous batch of an ordered sequence.
pub fn batch_weights(ordered: &[Unit], batch_count: NonZeroUsize) -> Vec<u64> {
    calculate_batches(ordered.len(), batch_count)
        .into_iter()
        .map(|range| {
            ordered[range.start..range.end]
                .iter()
                .filter_map(|u| u.weight)
                .sum()
        })
        .collect()
}
