// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylepipeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid browser target '{target}': {reason}")]
    InvalidBrowserTarget { target: String, reason: String },

    #[error("IO error at {path:?}: {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Prefix failed for {path:?}: {message}")]
    PrefixFailed { path: PathBuf, message: String },

    #[error("Minify failed for {path:?}: {message}")]
    MinifyFailed { path: PathBuf, message: String },

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StylepipeError {
    /// Wrap an IO error with the path it happened on.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StylepipeError::PathIo {
            path: path.into(),
            source,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StylepipeError>;
