// src/config/model.rs

use std::path::{Path, PathBuf};

use lightningcss::targets::Browsers;
use serde::Deserialize;

use crate::types::{CompileStyle, TriggerWhileRunningBehaviour};

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// triggered_while_running_behaviour = "queue"
/// queue_length = 1
///
/// [compile]
/// entry = "sass/project/main.scss"
/// output = "css/main.css"
///
/// [prefix]
/// browsers = ["Chrome 50", "Safari 5"]
///
/// [minify]
/// debug = true
///
/// [watch]
/// patterns = ["sass/**/*.scss"]
/// ```
///
/// All sections are optional; an empty file describes the stock pipeline.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub compile: CompileSection,

    #[serde(default)]
    pub prefix: PrefixSection,

    #[serde(default)]
    pub minify: MinifySection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holders can rely on the browser list being parsed and the globs compiling.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub compile: CompileSection,
    pub prefix: PrefixSection,
    pub minify: MinifySection,
    pub watch: WatchSection,
    browsers: Browsers,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile, browsers: Browsers) -> Self {
        Self {
            config: raw.config,
            compile: raw.compile,
            prefix: raw.prefix,
            minify: raw.minify,
            watch: raw.watch,
            browsers,
        }
    }

    /// Parsed prefix targets (oldest version per engine).
    pub fn browsers(&self) -> Browsers {
        self.browsers
    }

    /// File the prefix stage rewrites in place.
    pub fn prefix_file(&self) -> &Path {
        self.prefix.file.as_deref().unwrap_or(&self.compile.output)
    }

    /// File the minify stage rewrites in place.
    pub fn minify_file(&self) -> &Path {
        self.minify.file.as_deref().unwrap_or(&self.compile.output)
    }
}

/// `[config]` section: run-overlap behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    #[serde(default)]
    pub triggered_while_running_behaviour: TriggerWhileRunningBehaviour,

    /// Maximum number of follow-up runs remembered while a run is active.
    #[serde(default = "default_queue_length")]
    pub queue_length: usize,

    /// Start one run as soon as watching begins.
    #[serde(default)]
    pub run_on_start: bool,
}

fn default_queue_length() -> usize {
    1
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            triggered_while_running_behaviour: TriggerWhileRunningBehaviour::default(),
            queue_length: default_queue_length(),
            run_on_start: false,
        }
    }
}

/// `[compile]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileSection {
    #[serde(default = "default_entry")]
    pub entry: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Extra directories searched by `@use` / `@import`.
    #[serde(default)]
    pub load_paths: Vec<PathBuf>,

    #[serde(default)]
    pub style: CompileStyle,
}

fn default_entry() -> PathBuf {
    PathBuf::from("sass/project/main.scss")
}

fn default_output() -> PathBuf {
    PathBuf::from("css/main.css")
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            output: default_output(),
            load_paths: Vec::new(),
            style: CompileStyle::default(),
        }
    }
}

/// `[prefix]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrefixSection {
    /// File rewritten in place; defaults to `compile.output`.
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,
}

/// Stock target list.
pub fn default_browsers() -> Vec<String> {
    [
        "Chrome 50",
        "Firefox 12",
        "Explorer 8",
        "Explorer 9",
        "Explorer 10",
        "Explorer 11",
        "Edge 12",
        "iOS 6",
        "Opera 35",
        "Safari 5",
        "ExplorerMobile 11",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for PrefixSection {
    fn default() -> Self {
        Self {
            file: None,
            browsers: default_browsers(),
        }
    }
}

/// `[minify]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinifySection {
    /// File rewritten in place; defaults to `compile.output`.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Print original and minified sizes after each run.
    #[serde(default = "default_debug")]
    pub debug: bool,
}

fn default_debug() -> bool {
    true
}

impl Default for MinifySection {
    fn default() -> Self {
        Self {
            file: None,
            debug: default_debug(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Globs relative to the project root.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Notifications within this window of a matching one count as the same change.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Ignore notifications whose file content did not actually change.
    #[serde(default)]
    pub use_hash: bool,
}

fn default_patterns() -> Vec<String> {
    vec!["sass/**/*.scss".to_string()]
}

fn default_debounce_ms() -> u64 {
    50
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            exclude: Vec::new(),
            debounce_ms: default_debounce_ms(),
            use_hash: false,
        }
    }
}
