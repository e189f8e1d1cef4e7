//! Invocation context: repository root, unit folder, and configuration.
//!
//! Built once per invocation and passed to the commands explicitly; nothing
//! here touches the process's current directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use range_core::config::CONFIG_FILE_NAME;
use range_core::{RangeConfig, Unit};
use range_sizer::LineCounter;
use tracing::info;

pub struct Workspace {
    pub root: PathBuf,
    pub folder: String,
    pub config: RangeConfig,
}

impl Workspace {
    pub fn open(folder: &str, repo_root: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let root = match repo_root {
            Some(root) => root
                .canonicalize()
                .with_context(|| format!("Repository root not found: {}", root.display()))?,
            None => git_toplevel()?,
        };

        let config_path = config
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
        let config = if config.is_some() {
            RangeConfig::from_file(&config_path)?
        } else {
            RangeConfig::load_or_default(&config_path)?
        };
        config.check_folder(folder)?;

        info!(root = %root.display(), folder, "Opened workspace");

        Ok(Workspace {
            root,
            folder: folder.to_string(),
            config,
        })
    }

    pub fn discover_units(&self) -> Result<Vec<Unit>> {
        range_sizer::discover_units(&self.root, &self.folder)
    }

    pub fn sizer(&self) -> LineCounter {
        LineCounter::from_config(&self.config.sizing)
    }
}

/// Resolve the repository root with `git rev-parse --show-toplevel`.
fn git_toplevel() -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .context("Failed to execute 'git'. Pass --repo-root to skip repository detection.")?;

    if !output.status.success() {
        bail!(
            "git rev-parse --show-toplevel failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let root = String::from_utf8(output.stdout).context("git printed a non UTF-8 path")?;
    Ok(PathBuf::from(root.trim()))
}
