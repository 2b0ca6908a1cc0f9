use crate::error::{CliError, Result};
use muatten::DataFiles;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "muatten.toml";

/// Data directory used when neither the command line nor the config names one.
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory with the tab-separated tables.
    pub data_dir: Option<PathBuf>,
    /// Snapshot to load instead of the tables.
    pub snapshot: Option<PathBuf>,
    /// File names inside the data directory.
    pub files: DataFiles,
}

/// Where the catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Dir(PathBuf),
    Snapshot(PathBuf),
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Command-line paths win over the file; a snapshot wins over a directory
    /// given at the same level.
    pub fn data_source(
        &self,
        cli_dir: Option<PathBuf>,
        cli_snapshot: Option<PathBuf>,
    ) -> DataSource {
        if let Some(path) = cli_snapshot {
            DataSource::Snapshot(path)
        } else if let Some(dir) = cli_dir {
            DataSource::Dir(dir)
        } else if let Some(path) = &self.snapshot {
            DataSource::Snapshot(path.clone())
        } else {
            DataSource::Dir(
                self.data_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            )
        }
    }
}

/// Load the explicit config file, or `muatten.toml` if it exists, or defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                debug!("No configuration file; using defaults.");
                return Ok(Config::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|e| {
        CliError::Config(format!("cannot read '{}': {e}", path.display()))
    })?;
    debug!("Loaded configuration from {}", path.display());
    Config::from_toml(&content, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("", Path::new("muatten.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.files, DataFiles::default());
    }

    #[test]
    fn parses_paths_and_file_overrides() {
        let config = Config::from_toml(
            r#"
            data_dir = "/opt/nist"

            [files]
            compound_table = "mixtures.dat"
            element_tables = ["low.dat", "high.dat"]
            "#,
            Path::new("muatten.toml"),
        )
        .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/opt/nist")));
        assert_eq!(config.files.compound_table, "mixtures.dat");
        assert_eq!(config.files.element_tables, vec!["low.dat", "high.dat"]);
        // Unset names keep their defaults.
        assert_eq!(config.files.element_names, "names_elements.txt");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("colour = \"red\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }

    #[test]
    fn data_source_precedence() {
        let config = Config {
            data_dir: Some(PathBuf::from("cfg-dir")),
            snapshot: Some(PathBuf::from("cfg.bin.zst")),
            files: DataFiles::default(),
        };
        assert_eq!(
            config.data_source(Some("cli-dir".into()), None),
            DataSource::Dir("cli-dir".into())
        );
        assert_eq!(
            config.data_source(None, Some("cli.bin.zst".into())),
            DataSource::Snapshot("cli.bin.zst".into())
        );
        assert_eq!(
            config.data_source(None, None),
            DataSource::Snapshot("cfg.bin.zst".into())
        );
        assert_eq!(
            Config::default().data_source(None, None),
            DataSource::Dir(DEFAULT_DATA_DIR.into())
        );
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "snapshot = \"db.bin.zst\"\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.snapshot, Some(PathBuf::from("db.bin.zst")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
