// src/tasks/prefix.rs

use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::errors::{Result, StylepipeError};
use crate::tasks::colours::keep_named_colours;
use crate::tasks::{read_input, write_file, Task, TaskReport, PREFIX};

/// Rewrites a CSS file in place with vendor prefixes for `browsers`.
#[derive(Debug, Clone)]
pub struct PrefixTask {
    file: PathBuf,
    browsers: Browsers,
}

impl PrefixTask {
    pub fn new(file: impl Into<PathBuf>, browsers: Browsers) -> Self {
        Self {
            file: file.into(),
            browsers,
        }
    }

    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        Self::new(root.join(cfg.prefix_file()), cfg.browsers())
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl Task for PrefixTask {
    fn name(&self) -> &str {
        PREFIX
    }

    fn run(&self) -> Result<TaskReport> {
        let Some(css) = read_input(&self.file)? else {
            warn!(task = PREFIX, file = ?self.file, "input file does not exist; nothing to prefix");
            return Ok(TaskReport::skipped(PREFIX, 0));
        };
        let prefixed = prefix_css(&css, &self.file, self.browsers)?;
        write_file(&self.file, prefixed.as_bytes())?;

        info!(
            task = PREFIX,
            file = ?self.file,
            before = css.len(),
            after = prefixed.len(),
            "applied vendor prefixes"
        );
        Ok(TaskReport::written(PREFIX, &self.file, css.len(), prefixed.len()))
    }
}

/// Vendor-prefix `css` for `browsers`, returning readable (non-minified) CSS.
///
/// Prefixed declarations already present in the input are merged with the
/// ones the targets require, so running this on its own output is stable.
/// Colour keywords from the input survive when their hex form is no shorter.
pub fn prefix_css(css: &str, path: &Path, browsers: Browsers) -> Result<String> {
    let fail = |message: String| StylepipeError::PrefixFailed {
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

    // The declaration handlers that emit prefixes run as part of `minify`.
    sheet
        .minify(MinifyOptions {
            targets: Targets::from(browsers),
            ..MinifyOptions::default()
        })
        .map_err(|e| fail(e.to_string()))?;

    let printed = sheet
        .to_css(PrinterOptions {
            minify: false,
            targets: Targets::from(browsers),
            ..PrinterOptions::default()
        })
        .map_err(|e| fail(e.to_string()))?;

    Ok(keep_named_colours(&printed.code, css))
}
