use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::SheetConfig;

/// Default config file name, looked up next to the sheet
pub const CONFIG_FILE: &str = "charsheet.toml";

/// Error type for reading the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read the configuration at `path`. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<SheetConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SheetConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// The config that applies to a sheet: `explicit` when given, otherwise
/// `charsheet.toml` in the sheet's directory.
pub fn config_path_for(sheet: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => sheet
            .parent()
            .unwrap_or(Path::new("."))
            .join(CONFIG_FILE),
    }
}
