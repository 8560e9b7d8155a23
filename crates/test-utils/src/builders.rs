#![allow(dead_code)]

use std::path::PathBuf;

use stylepipe::config::{ConfigFile, RawConfigFile};
use stylepipe::errors::Result;
use stylepipe::types::{CompileStyle, TriggerWhileRunningBehaviour};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the stock pipeline defaults, except that the minify size
/// report is switched off so tests don't write to stdout.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        let mut config = RawConfigFile::default();
        config.minify.debug = false;
        Self { config }
    }

    pub fn behaviour(mut self, behaviour: TriggerWhileRunningBehaviour) -> Self {
        self.config.config.triggered_while_running_behaviour = behaviour;
        self
    }

    pub fn queue_length(mut self, len: usize) -> Self {
        self.config.config.queue_length = len;
        self
    }

    pub fn run_on_start(mut self, val: bool) -> Self {
        self.config.config.run_on_start = val;
        self
    }

    pub fn entry(mut self, path: &str) -> Self {
        self.config.compile.entry = PathBuf::from(path);
        self
    }

    pub fn output(mut self, path: &str) -> Self {
        self.config.compile.output = PathBuf::from(path);
        self
    }

    pub fn load_path(mut self, path: &str) -> Self {
        self.config.compile.load_paths.push(PathBuf::from(path));
        self
    }

    pub fn style(mut self, style: CompileStyle) -> Self {
        self.config.compile.style = style;
        self
    }

    /// Replace the browser list.
    pub fn browsers(mut self, targets: &[&str]) -> Self {
        self.config.prefix.browsers = targets.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn minify_debug(mut self, val: bool) -> Self {
        self.config.minify.debug = val;
        self
    }

    /// Replace the watch globs.
    pub fn watch(mut self, patterns: &[&str]) -> Self {
        self.config.watch.patterns = patterns.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.watch.exclude.push(pattern.to_string());
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.watch.debounce_ms = ms;
        self
    }

    pub fn use_hash(mut self, val: bool) -> Self {
        self.config.watch.use_hash = val;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        self.try_build()
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
