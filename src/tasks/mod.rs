// src/tasks/mod.rs

//! The named units of work a pipeline run is made of.
//!
//! - [`compile`] turns the SASS entry file into CSS (`grass`).
//! - [`prefix`] adds vendor-prefixed declarations for the configured
//!   browser targets (`lightningcss`).
//! - [`minify`] minifies the prefixed CSS in place (`lightningcss`).
//! - [`registry`] maps task names to tasks and starts them on the blocking
//!   pool.
//! - [`targets`] resolves the browser target list.
//!
//! Every task reads one file and writes one file; none of them keeps state
//! between invocations.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{Result, StylepipeError};

mod colours;
pub mod compile;
pub mod minify;
pub mod prefix;
pub mod registry;
pub mod targets;

pub use compile::CompileTask;
pub use minify::{MinifyDetails, MinifyTask};
pub use prefix::PrefixTask;
pub use registry::{TaskHandle, TaskRegistry};

pub const COMPILE: &str = "compile";
pub const PREFIX: &str = "prefix";
pub const MINIFY: &str = "minify";

/// A named unit of work.
///
/// `run` is synchronous and may block on file IO and CPU-heavy parsing; the
/// registry moves it onto Tokio's blocking pool and hands back a
/// [`TaskHandle`].
pub trait Task: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn run(&self) -> Result<TaskReport>;
}

/// What a finished task did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub task: String,
    /// File written, or `None` when the task recovered without output.
    pub output: Option<PathBuf>,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

impl TaskReport {
    pub fn written(task: &str, output: &Path, input_bytes: usize, output_bytes: usize) -> Self {
        Self {
            task: task.to_string(),
            output: Some(output.to_path_buf()),
            input_bytes,
            output_bytes,
        }
    }

    pub fn skipped(task: &str, input_bytes: usize) -> Self {
        Self {
            task: task.to_string(),
            output: None,
            input_bytes,
            output_bytes: 0,
        }
    }
}

/// Read a stage's input file; `None` if it does not exist.
///
/// A compile that recovered from a syntax error leaves no CSS behind on a
/// fresh project, and the later stages then have nothing to do.
pub(crate) fn read_input(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(css) => Ok(Some(css)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StylepipeError::io_at(path, e)),
    }
}

/// Write `contents`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StylepipeError::io_at(parent, e))?;
        }
    }
    fs::write(path, contents).map_err(|e| StylepipeError::io_at(path, e))
}
