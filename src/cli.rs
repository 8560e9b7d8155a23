// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stylepipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stylepipe",
    version,
    about = "Compile, prefix and minify SASS; rebuild on every change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Stylepipe.toml` in the current working directory. When that
    /// file does not exist the built-in pipeline defaults are used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Run the pipeline once and exit instead of watching.
    #[arg(long)]
    pub once: bool,

    /// Run a single named task instead of the default watch mode.
    #[arg(long, value_enum, value_name = "NAME")]
    pub task: Option<TaskArg>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STYLEPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the resolved pipeline, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Task selectable with `--task`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskArg {
    /// SASS → CSS.
    #[value(alias = "sass")]
    Compile,
    /// Add vendor prefixes to the compiled CSS.
    Prefix,
    /// Minify the prefixed CSS.
    #[value(alias = "minify-css")]
    Minify,
    /// compile → prefix → minify, once.
    Build,
    /// Watch the sources and run the pipeline on every change.
    Watch,
}

impl CliArgs {
    /// Resolve `--once` and `--task` into what should actually run.
    ///
    /// `--once` without `--task` means a single pipeline run; no flags at
    /// all means watching.
    pub fn mode(&self) -> TaskArg {
        match (self.task, self.once) {
            (Some(TaskArg::Watch), true) | (None, true) => TaskArg::Build,
            (Some(task), _) => task,
            (None, false) => TaskArg::Watch,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
