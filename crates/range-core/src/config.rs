//! crate-range.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// File name looked up at the repository root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "crate-range.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub discovery: DiscoveryConfig,
    pub sizing: SizingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Folders under the repository root that may be passed to `--folder`.
    pub folders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// File extensions (without the dot) whose lines count toward a unit's weight.
    pub extensions: Vec<String>,
    /// Directory names skipped while walking a unit.
    pub exclude: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            folders: vec!["sdk".to_string(), "examples".to_string()],
        }
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        SizingConfig {
            extensions: vec!["rs".to_string()],
            exclude: vec!["target".to_string()],
        }
    }
}

impl RangeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn check_folder(&self, folder: &str) -> Result<(), ConfigError> {
        if self.discovery.folders.iter().any(|f| f == folder) {
            Ok(())
        } else {
            Err(ConfigError::UnknownFolder {
                folder: folder.to_string(),
                allowed: self.discovery.folders.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RangeConfig::default();
        assert_eq!(config.discovery.folders, vec!["sdk", "examples"]);
        assert_eq!(config.sizing.extensions, vec!["rs"]);
        assert_eq!(config.sizing.exclude, vec!["target"]);
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[sizing]
extensions = ["rs", "toml"]
"#;
        let config: RangeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sizing.extensions, vec!["rs", "toml"]);
        assert_eq!(config.sizing.exclude, vec!["target"]);
        assert_eq!(config.discovery.folders, vec!["sdk", "examples"]);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RangeConfig::load_or_default(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, RangeConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[discovery]\nfolders = 3\n").unwrap();

        let err = RangeConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_check_folder() {
        let config = RangeConfig::default();
        assert!(config.check_folder("sdk").is_ok());
        let err = config.check_folder("tools").unwrap_err();
        assert!(err.to_string().contains("sdk, examples"));
    }
}
