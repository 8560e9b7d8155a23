// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::ConfigFile;
use crate::errors::{Result, StylepipeError};

/// Compiled watch/exclude globs for the source tree.
///
/// The patterns are relative to the project root; the watcher passes
/// relative paths such as `"sass/project/_vars.scss"` into [`matches`].
///
/// [`matches`]: WatchProfile::matches
#[derive(Clone)]
pub struct WatchProfile {
    patterns: Vec<String>,
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for WatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchProfile")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl WatchProfile {
    pub fn new(patterns: &[String], exclude: &[String]) -> Result<Self> {
        let watch_set = build_globset(patterns)?;
        let exclude_set = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(exclude)?)
        };

        Ok(Self {
            patterns: patterns.to_vec(),
            watch_set,
            exclude_set,
        })
    }

    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        Self::new(&cfg.watch.patterns, &cfg.watch.exclude)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if a change to `rel_path` should trigger a run.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        match &self.exclude_set {
            Some(exclude) => !exclude.is_match(rel_path),
            None => true,
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        // Tolerate the `./sass/**` spelling used by other build tools.
        let normalized = pat.strip_prefix("./").unwrap_or(pat);
        let glob = Glob::new(normalized).map_err(|e| {
            StylepipeError::ConfigError(format!("invalid glob pattern '{pat}': {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| StylepipeError::ConfigError(format!("building glob set: {e}")))
}

/// Walk `root` and return every file the profile matches.
pub fn collect_matching_files(root: &Path, profile: &WatchProfile) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| StylepipeError::io_at(&dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| StylepipeError::io_at(&dir, e))?.path();
            if path.is_dir() {
                stack.push(path);
            } else if let Some(rel) = relative_str(root, &path) {
                if profile.matches(&rel) {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// `path` relative to `root` with forward slashes.
///
/// Falls back to canonicalized paths so that symlinked prefixes (e.g.
/// `/private/var` on macOS) still relate. `None` if `path` is outside `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let to_str = |rel: &Path| rel.to_string_lossy().replace('\\', "/");

    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_str(rel));
    }

    let root_canon = root.canonicalize().ok()?;
    let path_canon = path.canonicalize().ok()?;
    path_canon.strip_prefix(&root_canon).ok().map(to_str)
}
