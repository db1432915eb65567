//! User settings read from `config.toml`.
//!
//! The file lives in the standard configuration directory
//! (`~/.config/swatchbook/config.toml` on most platforms). Every field is
//! optional; a missing file means defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "SWATCHBOOK_CONFIG";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SWATCHBOOK_DATA_DIR";

pub const CONFIG_FILE_NAME: &str = "config.toml";

const APP_DIR: &str = "swatchbook";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub pretty_exports: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: String::from("warn"),
            pretty_exports: true,
        }
    }
}

impl Settings {
    /// Load from the default location, honouring the environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);

        Ok(Self::from_file(&path)?.with_env_overrides())
    }

    /// Apply `SWATCHBOOK_DATA_DIR` on top of these settings.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir.trim()));
            }
        }
        self
    }

    /// Parse `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Directory the JSON-file backend writes to.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml(r#"data_dir = "/tmp/swatches""#).unwrap();
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/swatches")));
        assert_eq!(settings.log_level, "warn");
        assert!(settings.pretty_exports);
        assert_eq!(settings.resolved_data_dir(), PathBuf::from("/tmp/swatches"));
    }

    #[test]
    fn invalid_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "pretty_exports = \"sometimes\"").unwrap();

        let error = Settings::from_file(&path).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn unreadable_path_is_reported() {
        let dir = tempdir().unwrap();
        // A directory cannot be read as a file.
        let error = Settings::from_file(dir.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }
}
