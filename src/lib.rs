// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod orchestrator;
pub mod pipeline;
pub mod tasks;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, TaskArg};
use crate::config::{default_config_path, load_or_default, ConfigFile};
use crate::orchestrator::Orchestrator;
use crate::tasks::{COMPILE, MINIFY, PREFIX};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the task registry and orchestrator
/// - the selected mode (single task, one-shot pipeline, or watching)
pub async fn run(args: CliArgs) -> Result<()> {
    let explicit = args.config.is_some();
    let config_path = args
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let cfg = load_or_default(&config_path, explicit)?;
    let root = config_root_dir(&config_path);

    let mode = args.mode();

    if args.dry_run {
        print_dry_run(&cfg, &root, mode);
        return Ok(());
    }

    let orchestrator = Orchestrator::new(cfg, root);

    match mode {
        TaskArg::Compile => {
            orchestrator.run_task(COMPILE).await?;
        }
        TaskArg::Prefix => {
            orchestrator.run_task(PREFIX).await?;
        }
        TaskArg::Minify => {
            orchestrator.run_task(MINIFY).await?;
        }
        TaskArg::Build => {
            let stats = orchestrator.run_pipeline_once().await?;
            info!(?stats, "build finished");
            if stats.failed > 0 {
                bail!("pipeline run failed; see the log above for the failing stage");
            }
        }
        TaskArg::Watch => {
            let stats = orchestrator.watch().await?;
            info!(?stats, "stopped watching");
        }
    }

    Ok(())
}

/// Figure out the project root that relative config paths resolve against.
///
/// - If the config path has a non-empty parent (e.g. "site/Stylepipe.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Stylepipe.toml" (parent = ""),
///   we fall back to the current working directory "."
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Simple dry-run output: print the resolved pipeline and its settings.
fn print_dry_run(cfg: &ConfigFile, root: &Path, mode: TaskArg) {
    println!("stylepipe dry-run");
    println!("  root = {}", root.display());
    println!("  mode = {mode:?}");
    println!(
        "  config.triggered_while_running_behaviour = {:?}",
        cfg.config.triggered_while_running_behaviour
    );
    println!("  config.queue_length = {}", cfg.config.queue_length);
    println!("  config.run_on_start = {}", cfg.config.run_on_start);
    println!();

    println!("stages:");
    println!("  - {COMPILE}");
    println!("      entry: {}", cfg.compile.entry.display());
    println!("      output: {}", cfg.compile.output.display());
    if !cfg.compile.load_paths.is_empty() {
        println!("      load_paths: {:?}", cfg.compile.load_paths);
    }
    println!("      style: {:?}", cfg.compile.style);
    println!("  - {PREFIX}");
    println!("      file: {}", cfg.prefix_file().display());
    println!("      browsers: {:?}", cfg.prefix.browsers);
    println!("  - {MINIFY}");
    println!("      file: {}", cfg.minify_file().display());
    println!("      debug: {}", cfg.minify.debug);
    println!();

    println!("watch:");
    println!("  patterns: {:?}", cfg.watch.patterns);
    if !cfg.watch.exclude.is_empty() {
        println!("  exclude: {:?}", cfg.watch.exclude);
    }
    println!("  debounce_ms: {}", cfg.watch.debounce_ms);
    println!("  use_hash: {}", cfg.watch.use_hash);

    debug!("dry-run complete (no execution)");
}
