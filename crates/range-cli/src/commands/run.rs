//! `crate-range run` — run a command in every crate of one batch.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use range_batch::{ProcessExecutor, RangeRunner, RunError, organize, select_range};
use range_sizer::report::format_unit_table;
use tracing::{error, info};

use crate::workspace::Workspace;

/// Exit code for a malformed or out-of-bounds range.
pub const RANGE_ERROR_EXIT: u8 = 2;

pub struct Args {
    pub batches: NonZeroUsize,
    pub start: i64,
    pub end: i64,
    pub folder: String,
    pub repo_root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub command: Vec<String>,
}

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let workspace = Workspace::open(
        &args.folder,
        args.repo_root.as_deref(),
        args.config.as_deref(),
    )?;

    info!("Determining crate list");
    let mut units = workspace.discover_units()?;

    // Reject bad ranges before spending time on line counts.
    let range = match select_range(units.len(), args.start, args.end) {
        Ok(range) => range,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::from(RANGE_ERROR_EXIT));
        }
    };

    range_sizer::measure_all(&mut units, &workspace.sizer())
        .context("Cannot place crates without measuring all of them")?;
    let ordered = organize(units, args.batches)?;

    print!("{}", format_unit_table(&ordered[range]));

    let mut runner = RangeRunner::new(ProcessExecutor);
    match runner.run(&ordered, args.start, args.end, &args.command) {
        Ok(report) => {
            info!(completed = report.completed.len(), "All commands succeeded");
            Ok(ExitCode::SUCCESS)
        }
        Err(RunError::Range(e)) => {
            error!("{e}");
            Ok(ExitCode::from(RANGE_ERROR_EXIT))
        }
        Err(e @ RunError::CommandFailed { exit_code, .. }) => {
            error!(completed = e.completed(), "{e}");
            Ok(ExitCode::from(failure_status(exit_code)))
        }
        Err(e) => {
            error!(completed = e.completed(), "Run stopped");
            Err(e.into())
        }
    }
}

/// Mirror a failed command's exit code; signals and codes outside `1..=255`
/// map to 1.
fn failure_status(code: Option<i32>) -> u8 {
    match code.and_then(|c| u8::try_from(c).ok()) {
        Some(c) if c != 0 => c,
        _ => 1,
    }
}
