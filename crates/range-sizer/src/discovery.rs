//! Unit discovery: lists the crates directly under a repository folder.

use anyhow::{Context, Result, bail};
use range_core::Unit;
use std::path::Path;

/// List every direct child of `root/folder` that contains a `Cargo.toml`.
///
/// Units are sorted by path so that the order, and therefore batch
/// membership, does not depend on how the filesystem enumerates entries.
pub fn discover_units(root: &Path, folder: &str) -> Result<Vec<Unit>> {
    let dir = root.join(folder);
    if !dir.is_dir() {
        bail!("Unit folder not found: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        if path.join("Cargo.toml").is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    tracing::info!(folder, count = paths.len(), "Discovered units");
    Ok(paths.into_iter().map(Unit::new).collect())
}
