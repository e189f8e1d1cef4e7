//! Matrix descriptors for a CI orchestrator.
//!
//! The orchestrator launches one `run` process per descriptor; each
//! `crate_range` entry is the argument string that selects its batch.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::partition::calculate_batches;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDocument {
    /// `[start, end)` pairs, one per batch.
    pub ranges: Vec<(usize, usize)>,
    /// `-b <batches> -s <start> -e <end>`, one per batch.
    pub crate_range: Vec<String>,
    /// Toolchain versions, echoed so the orchestrator can cross them with the ranges.
    pub rust_version: Vec<String>,
}

pub fn generate(
    total_count: usize,
    batch_count: NonZeroUsize,
    rust_versions: &[String],
) -> MatrixDocument {
    let batches = calculate_batches(total_count, batch_count);

    tracing::info!(
        total_count,
        batch_count = batch_count.get(),
        ranges = batches.len(),
        "Generated batch matrix"
    );

    MatrixDocument {
        ranges: batches.iter().map(|&b| b.into()).collect(),
        crate_range: batches
            .iter()
            .map(|b| b.to_run_args(batch_count.get()))
            .collect(),
        rust_version: rust_versions.to_vec(),
    }
}

impl MatrixDocument {
    /// Single-line JSON, as CI matrix inputs expect.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
