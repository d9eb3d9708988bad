//! User preferences stored as JSON.
//!
//! Location is `<config dir>/diffpane/config.json`
//! (`~/.config/diffpane/config.json` on Linux).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{pairing::PairingStrategy, ui::render_ui::DEFAULT_TAB_WIDTH};

const APP_NAME: &str = "diffpane";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not determine the config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Palette name, `dark` or `light`.
    pub theme: String,
    pub tab_width: usize,
    /// Prefer the side-by-side layout when the terminal is wide enough.
    pub split_diff: bool,
    pub pairing: PairingStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tab_width: DEFAULT_TAB_WIDTH,
            split_diff: false,
            pairing: PairingStrategy::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, or the default location when `None`. Never fails: a
    /// missing file silently yields defaults, anything else is logged.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let resolved = match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        };
        let path = match resolved {
            Ok(path) => path,
            Err(err) => {
                log::warn!("{}, using default config", err);
                return Self::default();
            }
        };

        match Self::load_from(&path) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("{}: {}, using default config", err, error_source(&err));
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;

        log::debug!("saved config to {}", path.display());
        Ok(())
    }
}

fn error_source(err: &ConfigError) -> String {
    std::error::Error::source(err)
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.tab_width, 4);
        assert!(!config.split_diff);
        assert_eq!(config.pairing, PairingStrategy::Positional);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"split_diff": true}"#).unwrap();
        assert!(config.split_diff);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.tab_width, 4);

        let config: Config =
            serde_json::from_str(r#"{"theme": "light", "pairing": "similarity"}"#).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.pairing, PairingStrategy::Similarity);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            theme: "light".to_string(),
            tab_width: 8,
            split_diff: true,
            pairing: PairingStrategy::Similarity,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());
    }
}
