// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StylepipeError};
use crate::tasks::targets::parse_browser_list;
use crate::watch::patterns::WatchProfile;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StylepipeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let browsers = parse_browser_list(&raw.prefix.browsers)?;
        Ok(ConfigFile::new_unchecked(raw, browsers))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_compile_paths(cfg)?;
    validate_watch_patterns(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    // triggered_while_running_behaviour is strongly typed and checked by serde.
    if cfg.config.queue_length == 0 {
        return Err(StylepipeError::ConfigError(
            "[config].queue_length must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_compile_paths(cfg: &RawConfigFile) -> Result<()> {
    if cfg.compile.entry.as_os_str().is_empty() {
        return Err(StylepipeError::ConfigError(
            "[compile].entry must not be empty".to_string(),
        ));
    }
    if cfg.compile.output.as_os_str().is_empty() {
        return Err(StylepipeError::ConfigError(
            "[compile].output must not be empty".to_string(),
        ));
    }
    if cfg.prefix.browsers.is_empty() {
        return Err(StylepipeError::ConfigError(
            "[prefix].browsers must list at least one target".to_string(),
        ));
    }
    Ok(())
}

fn validate_watch_patterns(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.patterns.is_empty() {
        return Err(StylepipeError::ConfigError(
            "[watch].patterns must contain at least one glob".to_string(),
        ));
    }

    // Compiling the profile is the only reliable way to validate the globs.
    WatchProfile::new(&cfg.watch.patterns, &cfg.watch.exclude)?;
    Ok(())
}
