//! Contiguous batch ranges over a flat sequence.

use std::num::NonZeroUsize;

use range_core::BatchRange;

/// Split `total_count` items into at most `batch_count` contiguous ranges.
///
/// Every range has `ceil(total_count / batch_count)` items except the last,
/// which may be shorter. Empty ranges are never produced, so fewer than
/// `batch_count` ranges come back when there are fewer items than batches.
pub fn calculate_batches(total_count: usize, batch_count: NonZeroUsize) -> Vec<BatchRange> {
    if total_count == 0 {
        return Vec::new();
    }

    let batch_size = total_count.div_ceil(batch_count.get());
    (0..total_count)
        .step_by(batch_size)
        .map(|start| BatchRange::new(start, total_count.min(start + batch_size)))
        .collect()
}

/// Slice `items` along the ranges of [`calculate_batches`].
pub fn split_list<T>(items: &[T], batch_count: NonZeroUsize) -> Vec<&[T]> {
    calculate_batches(items.len(), batch_count)
        .into_iter()
        .map(|range| &items[range.start..range.end])
        .collect()
}
