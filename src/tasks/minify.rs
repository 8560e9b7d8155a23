// src/tasks/minify.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::errors::{Result, StylepipeError};
use crate::tasks::colours::keep_named_colours;
use crate::tasks::{read_input, write_file, Task, TaskReport, MINIFY};

/// Size statistics handed to the reporter after each minification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyDetails {
    pub name: String,
    pub original_size: usize,
    pub minified_size: usize,
}

type Reporter = Arc<dyn Fn(&MinifyDetails) + Send + Sync>;

/// Minifies a CSS file in place.
///
/// With `debug` on, every run calls the reporter with the file name and the
/// sizes before and after; the default reporter prints both to stdout.
#[derive(Clone)]
pub struct MinifyTask {
    file: PathBuf,
    browsers: Browsers,
    debug: bool,
    reporter: Reporter,
}

impl fmt::Debug for MinifyTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinifyTask")
            .field("file", &self.file)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl MinifyTask {
    pub fn new(file: impl Into<PathBuf>, browsers: Browsers) -> Self {
        Self {
            file: file.into(),
            browsers,
            debug: true,
            reporter: Arc::new(print_details),
        }
    }

    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        Self::new(root.join(cfg.minify_file()), cfg.browsers()).with_debug(cfg.minify.debug)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_reporter<F>(mut self, reporter: F) -> Self
    where
        F: Fn(&MinifyDetails) + Send + Sync + 'static,
    {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

fn print_details(details: &MinifyDetails) {
    println!("{}: {}", details.name, details.original_size);
    println!("{}: {}", details.name, details.minified_size);
}

impl Task for MinifyTask {
    fn name(&self) -> &str {
        MINIFY
    }

    fn run(&self) -> Result<TaskReport> {
        let Some(css) = read_input(&self.file)? else {
            warn!(task = MINIFY, file = ?self.file, "input file does not exist; nothing to minify");
            return Ok(TaskReport::skipped(MINIFY, 0));
        };
        let minified = minify_css(&css, &self.file, self.browsers)?;
        write_file(&self.file, minified.as_bytes())?;

        let details = MinifyDetails {
            name: self
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file.display().to_string()),
            original_size: css.len(),
            minified_size: minified.len(),
        };
        info!(
            task = MINIFY,
            file = %details.name,
            original_size = details.original_size,
            minified_size = details.minified_size,
            "minified style sheet"
        );
        if self.debug {
            (self.reporter)(&details);
        }

        Ok(TaskReport::written(MINIFY, &self.file, css.len(), minified.len()))
    }
}

/// Minify `css`, keeping whatever prefixed declarations `browsers` still need.
///
/// `blue` stays `blue`: a keyword is only swapped for hex when the hex is
/// strictly shorter.
pub fn minify_css(css: &str, path: &Path, browsers: Browsers) -> Result<String> {
    let fail = |message: String| StylepipeError::MinifyFailed {
        path: path.to_path_buf(),
        message,
    };

    let mut sheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: path.display().to_string(),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| fail(e.to_string()))?;

    sheet
        .minify(MinifyOptions {
            targets: Targets::from(browsers),
            ..MinifyOptions::default()
        })
        .map_err(|e| fail(e.to_string()))?;

    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            targets: Targets::from(browsers),
            ..PrinterOptions::default()
        })
        .map_err(|e| fail(e.to_string()))?;

    Ok(keep_named_colours(&printed.code, css))
}
