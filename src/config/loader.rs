// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StylepipeError};

/// File name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "Stylepipe.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** parse the browser
/// list or compile globs. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| StylepipeError::io_at(path, e))?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Parses the prefix browser list and compiles the watch globs.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to the stock pipeline.
///
/// The fallback only applies when the caller did not name the file
/// explicitly; a missing explicit config is an error.
pub fn load_or_default(path: impl AsRef<Path>, explicit: bool) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !explicit && !path.exists() {
        info!(path = ?path, "no config file found; using built-in pipeline defaults");
        return ConfigFile::try_from(RawConfigFile::default());
    }
    load_and_validate(path)
}

/// Default config path relative to the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
