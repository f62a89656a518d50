//! Configuration file schema
//!
//! One YAML file selects the data-source backend, the artifact directory, and
//! the forest hyperparameters. The pipeline itself is backend-agnostic; the
//! choice between the SQLite and CSV stores happens here, not in parallel
//! copies of the code.

use crate::artifacts::ArtifactStore;
use crate::forest::ForestConfig;
use crate::store::{CsvStore, RecordStore, SqliteStore};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "abastecer.yaml";

/// Which record-store backend to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum SourceConfig {
    /// SQLite database file
    Sqlite { path: PathBuf },
    /// Directory of CSV files with the original headers
    Csv { dir: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("mess.db"),
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    /// Directory holding the persisted model/encoder bundle
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    #[serde(default)]
    pub forest: ForestConfig,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            artifacts_dir: default_artifacts_dir(),
            forest: ForestConfig::default(),
        }
    }
}

impl Config {
    /// Open the configured record store
    pub fn open_store(&self) -> Result<Box<dyn RecordStore>> {
        match &self.source {
            SourceConfig::Sqlite { path } => Ok(Box::new(SqliteStore::open(path)?)),
            SourceConfig::Csv { dir } => Ok(Box::new(CsvStore::open(dir))),
        }
    }

    /// Artifact store at the configured directory
    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.artifacts_dir)
    }

    /// Path of the SQLite database, when the source is SQLite
    pub fn sqlite_path(&self) -> Option<&Path> {
        match &self.source {
            SourceConfig::Sqlite { path } => Some(path),
            SourceConfig::Csv { .. } => None,
        }
    }
}

/// Load configuration: an explicit path must exist; otherwise the default
/// file is used when present, else built-in defaults
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => read_config_file(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                read_config_file(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config_file(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_yaml::from_str(&text)
        .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
        assert_eq!(config.forest.n_trees, 100);
        assert!(config.sqlite_path().is_some());
    }

    #[test]
    fn test_yaml_csv_source() {
        let yaml = "
source:
  backend: csv
  dir: data
artifacts_dir: out/artifacts
forest:
  n_trees: 10
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.source,
            SourceConfig::Csv {
                dir: PathBuf::from("data")
            }
        );
        assert_eq!(config.forest.n_trees, 10);
        assert_eq!(config.forest.seed, 42, "unset fields take defaults");
        assert!(config.sqlite_path().is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("artifacts_dir: elsewhere").unwrap();
        assert_eq!(config.artifacts_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn test_explicit_missing_path_is_config_error() {
        let err = load_config(Some(Path::new("/nonexistent/abastecer.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
