//! Batching for crate-range.
//!
//! Splits a set of weighted units into a fixed number of batches whose total
//! weight is comparable, and runs a command over one selected batch.
//!
//! # Components
//!
//! - **`partition`** — contiguous index ranges of near-equal length
//! - **`distributor`** — weight-striped reordering so contiguous ranges balance
//! - **`matrix`** — batch descriptors for a CI orchestrator
//! - **`runner`** — range validation and sequential command execution
//!
//! Balancing happens entirely through reordering: `organize` stripes heavy
//! and light units across buckets, after which `calculate_batches` only has
//! to cut the flat list into contiguous slices.

pub mod distributor;
pub mod matrix;
pub mod partition;
pub mod runner;

pub use distributor::{batch_weights, organize};
pub use matrix::{MatrixDocument, generate};
pub use partition::{calculate_batches, split_list};
pub use runner::{
    CommandExecutor, CommandStatus, ProcessExecutor, RangeRunner, RunError, RunReport,
    select_range,
};
