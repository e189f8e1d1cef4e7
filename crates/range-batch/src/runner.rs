//! Executes a command once per unit in a selected range.
//!
//! Execution is strictly sequential; batches run in parallel only as separate
//! processes. The working directory is handed to the executor per command and
//! the process's current directory is never changed.

use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use range_core::{BatchError, Unit};
use thiserror::Error;
use tracing::{error, info};

/// Exit status of one command invocation. `code` is `None` when the process
/// was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs one command to completion in a given working directory.
pub trait CommandExecutor {
    fn execute(&mut self, argv: &[String], working_dir: &Path) -> io::Result<CommandStatus>;
}

/// Spawns real processes with inherited stdio.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&mut self, argv: &[String], working_dir: &Path) -> io::Result<CommandStatus> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let status = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Range(#[from] BatchError),

    #[error("no command given")]
    EmptyCommand,

    #[error(
        "failed to start command in {} (unit {position} of {range_len}, {completed} completed): {source}",
        unit.display()
    )]
    Spawn {
        unit: PathBuf,
        position: usize,
        range_len: usize,
        completed: usize,
        #[source]
        source: io::Error,
    },

    #[error(
        "command failed in {} with {} (unit {position} of {range_len}, {completed} completed)",
        unit.display(),
        describe_exit(*exit_code)
    )]
    CommandFailed {
        unit: PathBuf,
        position: usize,
        range_len: usize,
        completed: usize,
        exit_code: Option<i32>,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_string(),
    }
}

impl RunError {
    /// Units that finished successfully before the run stopped.
    pub fn completed(&self) -> usize {
        match self {
            RunError::Spawn { completed, .. } | RunError::CommandFailed { completed, .. } => {
                *completed
            }
            RunError::Range(_) | RunError::EmptyCommand => 0,
        }
    }
}

/// Units processed by a successful run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub completed: Vec<PathBuf>,
}

/// Validate `[start, end)` against a sequence of `len` units.
///
/// A malformed pair is reported as [`BatchError::InvalidRange`]; a well-formed
/// pair that reaches past the available units gets one of the out-of-bounds
/// kinds.
pub fn select_range(len: usize, start: i64, end: i64) -> Result<Range<usize>, BatchError> {
    let malformed = BatchError::InvalidRange { start, end };
    if end <= start {
        return Err(malformed);
    }
    let (Ok(start_idx), Ok(end_idx)) = (usize::try_from(start), usize::try_from(end)) else {
        return Err(malformed);
    };

    if start_idx >= len {
        return Err(BatchError::RangeStartOutOfBounds {
            start,
            available: len,
        });
    }
    if end_idx > len {
        return Err(BatchError::RangeEndOutOfBounds {
            end,
            available: len,
        });
    }

    Ok(start_idx..end_idx)
}

pub struct RangeRunner<E> {
    executor: E,
}

impl<E: CommandExecutor> RangeRunner<E> {
    pub fn new(executor: E) -> Self {
        RangeRunner { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `argv` once per unit in `ordered[start..end]`, stopping at the
    /// first failure. Nothing is executed if the range or command is invalid.
    pub fn run(
        &mut self,
        ordered: &[Unit],
        start: i64,
        end: i64,
        argv: &[String],
    ) -> Result<RunReport, RunError> {
        let range = select_range(ordered.len(), start, end)?;
        if argv.is_empty() {
            return Err(RunError::EmptyCommand);
        }

        let selected = &ordered[range];
        let range_len = selected.len();
        let mut report = RunReport::default();

        for (index, unit) in selected.iter().enumerate() {
            let completed = report.completed.len();
            let position = index + 1;
            info!(
                unit = %unit.path.display(),
                weight = unit.weight.unwrap_or_default(),
                completed,
                remaining = range_len - completed,
                "Running command"
            );

            let status = self
                .executor
                .execute(argv, &unit.path)
                .map_err(|source| RunError::Spawn {
                    unit: unit.path.clone(),
                    position,
                    range_len,
                    completed,
                    source,
                })?;

            if !status.success() {
                error!(
                    unit = %unit.path.display(),
                    exit_code = ?status.code,
                    completed,
                    "Command failed"
                );
                return Err(RunError::CommandFailed {
                    unit: unit.path.clone(),
                    position,
                    range_len,
                    completed,
                    exit_code: status.code,
                });
            }

            report.completed.push(unit.path.clone());
        }

        info!(completed = report.completed.len(), "Range finished");
        Ok(report)
    }
}
