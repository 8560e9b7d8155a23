// src/tasks/compile.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::ConfigFile;
use crate::errors::{Result, StylepipeError};
use crate::tasks::{write_file, Task, TaskReport, COMPILE};
use crate::types::CompileStyle;

/// Compiles the SASS entry file into a CSS file.
///
/// Compiler errors (syntax errors, undefined variables, unresolved imports)
/// are logged and the task completes without writing anything, so the rest
/// of the run still happens. A missing entry file or an unwritable output is
/// a real failure.
#[derive(Debug, Clone)]
pub struct CompileTask {
    entry: PathBuf,
    output: PathBuf,
    load_paths: Vec<PathBuf>,
    style: CompileStyle,
}

impl CompileTask {
    pub fn new(entry: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            output: output.into(),
            load_paths: Vec::new(),
            style: CompileStyle::default(),
        }
    }

    /// Build from `[compile]`, resolving paths against `root`.
    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        Self {
            entry: root.join(&cfg.compile.entry),
            output: root.join(&cfg.compile.output),
            load_paths: cfg.compile.load_paths.iter().map(|p| root.join(p)).collect(),
            style: cfg.compile.style,
        }
    }

    pub fn with_load_paths(mut self, load_paths: Vec<PathBuf>) -> Self {
        self.load_paths = load_paths;
        self
    }

    pub fn with_style(mut self, style: CompileStyle) -> Self {
        self.style = style;
        self
    }

    pub fn entry(&self) -> &Path {
        &self.entry
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    fn options(&self) -> grass::Options<'_> {
        let mut options = grass::Options::default().style(self.style.into());
        if let Some(dir) = self.entry.parent() {
            options = options.load_path(dir);
        }
        for path in &self.load_paths {
            options = options.load_path(path);
        }
        options
    }
}

impl Task for CompileTask {
    fn name(&self) -> &str {
        COMPILE
    }

    fn run(&self) -> Result<TaskReport> {
        let input_bytes = fs::metadata(&self.entry)
            .map_err(|e| StylepipeError::io_at(&self.entry, e))?
            .len() as usize;

        match grass::from_path(&self.entry, &self.options()) {
            Ok(css) => {
                write_file(&self.output, css.as_bytes())?;
                info!(
                    task = COMPILE,
                    entry = ?self.entry,
                    output = ?self.output,
                    bytes = css.len(),
                    "compiled style sheet"
                );
                Ok(TaskReport::written(COMPILE, &self.output, input_bytes, css.len()))
            }
            Err(err) => {
                error!(task = COMPILE, entry = ?self.entry, "sass compile error:\n{err}");
                Ok(TaskReport::skipped(COMPILE, input_bytes))
            }
        }
    }
}
