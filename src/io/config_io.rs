use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "ticklist.toml";

/// Error type for config loading
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

/// Read the config file at `path`.
///
/// A missing file yields the defaults only when `required` is false; a file
/// that exists but does not parse is always an error.
pub fn read_config(path: &Path, required: bool) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
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

/// Resolve store paths in `config` against `base` when they are relative
pub fn resolve_paths(config: &mut Config, base: &Path) {
    if config.store.file.is_relative() {
        config.store.file = base.join(&config.store.file);
    }
    if config.store.call_file.is_relative() {
        config.store.call_file = base.join(&config.store.call_file);
    }
}
