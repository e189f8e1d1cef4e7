use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

mod commands;
mod workspace;

#[derive(Parser)]
#[command(
    name = "crate-range",
    about = "Split crates into balanced batches and run commands over one batch",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the batch matrix as JSON for a CI orchestrator.
    ///
    /// Each `crate_range` entry is the `-b/-s/-e` argument string that
    /// selects one batch on the `run` subcommand.
    GenerateMatrix {
        /// Number of batches
        #[arg(short = 'b', long = "batches", value_name = "N")]
        batches: NonZeroUsize,
        /// Use this unit count instead of discovering units
        #[arg(long, conflicts_with = "folder")]
        total: Option<usize>,
        /// Folder containing the crates to batch
        #[arg(long, required_unless_present = "total")]
        folder: Option<String>,
        #[command(flatten)]
        location: Location,
        /// Toolchain versions to cross with the batch ranges
        #[arg(required = true, value_name = "RUST_VERSION")]
        rust_versions: Vec<String>,
    },
    /// Run a command in every crate of one batch.
    ///
    /// Crates are ordered by line count and striped across the batches
    /// before the `[start, end)` range is taken, so the same arguments always
    /// select the same crates.
    Run {
        /// Number of batches
        #[arg(short = 'b', long = "batches", value_name = "N")]
        batches: NonZeroUsize,
        /// Range start (inclusive)
        #[arg(short = 's', long = "start", allow_negative_numbers = true)]
        start: i64,
        /// Range end (exclusive)
        #[arg(short = 'e', long = "end", allow_negative_numbers = true)]
        end: i64,
        /// Folder containing the crates to run against
        #[arg(long)]
        folder: String,
        #[command(flatten)]
        location: Location,
        /// Command to run in each crate
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Args)]
struct Location {
    /// Repository root (default: `git rev-parse --show-toplevel`)
    #[arg(long)]
    repo_root: Option<PathBuf>,
    /// Config file (default: <repo-root>/crate-range.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Logs go to stderr; stdout carries only command output.
fn init_tracing(json: bool) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("crate_range=info".parse()?)
                .add_directive("range_sizer=info".parse()?)
                .add_directive("range_batch=info".parse()?)
        );

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    match cli.command {
        Commands::GenerateMatrix {
            batches,
            total,
            folder,
            location,
            rust_versions,
        } => {
            let source = match (total, folder) {
                (Some(total), _) => commands::matrix::CountSource::Total(total),
                (None, Some(folder)) => commands::matrix::CountSource::Discover {
                    folder,
                    repo_root: location.repo_root,
                    config: location.config,
                },
                (None, None) => anyhow::bail!("either --total or --folder is required"),
            };
            commands::matrix::generate_matrix(source, batches, &rust_versions)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run {
            batches,
            start,
            end,
            folder,
            location,
            command,
        } => commands::run::run(commands::run::Args {
            batches,
            start,
            end,
            folder,
            repo_root: location.repo_root,
            config: location.config,
            command,
        }),
    }
}
