//! Native line counter, the default unit sizer.
//!
//! Walks a unit directory and counts newline bytes in every source file,
//! which matches what `wc -l` reports for the same files. Symlinked files are
//! read through; symlinked directories are not descended into.

use std::ffi::OsStr;
use std::path::Path;

use range_core::config::SizingConfig;
use range_core::{MeasurementError, UnitSizer};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct LineCounter {
    extensions: Vec<String>,
    exclude: Vec<String>,
}

impl LineCounter {
    pub fn new(extensions: Vec<String>, exclude: Vec<String>) -> Self {
        LineCounter { extensions, exclude }
    }

    pub fn from_config(config: &SizingConfig) -> Self {
        Self::new(config.extensions.clone(), config.exclude.clone())
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude.iter().any(|e| e == name))
    }

    fn is_counted(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl Default for LineCounter {
    fn default() -> Self {
        Self::from_config(&SizingConfig::default())
    }
}

impl UnitSizer for LineCounter {
    fn measure(&self, path: &Path) -> Result<u64, MeasurementError> {
        let mut total = 0u64;
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = entry.map_err(|e| MeasurementError::new(path, e))?;
            // `path().is_file()` follows a symlink to its target file.
            if !entry.path().is_file() || !self.is_counted(entry.path()) {
                continue;
            }
            let bytes = std::fs::read(entry.path())
                .map_err(|e| MeasurementError::new(entry.path(), e))?;
            total += bytes.iter().filter(|&&b| b == b'\n').count() as u64;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_counts_rust_sources_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "fn a() {}\nfn b() {}\n").unwrap();
        fs::write(dir.path().join("src/nested/mod.rs"), "// one\n// two\n// three\n").unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();

        let weight = LineCounter::default().measure(dir.path()).unwrap();
        assert_eq!(weight, 5);
    }

    #[test]
    fn test_trailing_line_without_newline_is_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\nfn other() {}").unwrap();

        assert_eq!(LineCounter::default().measure(dir.path()).unwrap(), 1);
    }

    #[test]
    fn test_skips_excluded_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("target/debug")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("target/debug/out.rs"), "a\nb\nc\n").unwrap();
        fs::write(dir.path().join("src/lib.rs"), "a\n").unwrap();

        assert_eq!(LineCounter::default().measure(dir.path()).unwrap(), 1);

        let counter = LineCounter::new(vec!["rs".to_string()], vec![]);
        assert_eq!(counter.measure(dir.path()).unwrap(), 4);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.rs"), "a\n").unwrap();
        fs::write(dir.path().join("Cargo.toml"), "a\nb\n").unwrap();

        let counter = LineCounter::new(vec!["rs".to_string(), "toml".to_string()], vec![]);
        assert_eq!(counter.measure(dir.path()).unwrap(), 3);
    }

    #[test]
    fn test_empty_unit_weighs_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LineCounter::default().measure(dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_missing_path_is_measurement_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = LineCounter::default().measure(&missing).unwrap_err();
        assert_eq!(err.path, missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_source_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.txt");
        fs::write(&target, "a\nb\nc\n").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("gen.rs")).unwrap();

        assert_eq!(LineCounter::default().measure(dir.path()).unwrap(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "a\n").unwrap();
        std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("alias")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("src/loop")).unwrap();

        assert_eq!(LineCounter::default().measure(dir.path()).unwrap(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_measurement_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked.rs");
        fs::write(&locked, "a\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read the file regardless of its mode.
        if fs::read(&locked).is_ok() {
            return;
        }

        let err = LineCounter::default().measure(dir.path()).unwrap_err();
        assert_eq!(err.path, locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
    }
}
