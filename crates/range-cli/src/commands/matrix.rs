use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::workspace::Workspace;

/// Where the unit count for the matrix comes from.
pub enum CountSource {
    Total(usize),
    Discover {
        folder: String,
        repo_root: Option<PathBuf>,
        config: Option<PathBuf>,
    },
}

pub fn generate_matrix(
    source: CountSource,
    batches: NonZeroUsize,
    rust_versions: &[String],
) -> anyhow::Result<()> {
    let total = match source {
        CountSource::Total(total) => total,
        CountSource::Discover {
            folder,
            repo_root,
            config,
        } => {
            let workspace = Workspace::open(&folder, repo_root.as_deref(), config.as_deref())?;
            workspace.discover_units()?.len()
        }
    };

    let document = range_batch::generate(total, batches, rust_versions);
    println!("{}", document.to_json()?);

    Ok(())
}
