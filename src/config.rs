use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::storage::Format;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// Loads the config if the file exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// directory where user files are written
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub default_format: Format,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_format: Format::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Deserialize)]
pub struct Logging {
    /// default filter for env_logger, `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[storage]
data_dir = "/home/alice/playlists"
default_format = "xml"

[logging]
level = "debug"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/home/alice/playlists"));
        assert_eq!(cfg.storage.default_format, Format::Xml);
        assert_eq!(cfg.logging.level, "debug");

        Ok(())
    }

    #[test]
    fn test_missing_sections_use_defaults() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("version = 1")?;

        assert_eq!(cfg.storage.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.storage.default_format, Format::Json);
        assert_eq!(cfg.logging.level, "info");

        Ok(())
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let toml_str = r#"
version = 1

[storage]
default_format = "yaml"
"#;

        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_or_default_without_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let cfg = Config::load_or_default(&dir.path().join("absent.toml"))?;

        assert_eq!(cfg.version, 0);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("data"));
        Ok(())
    }
}
