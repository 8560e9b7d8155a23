// src/watch/watcher.rs

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::engine::{RuntimeEvent, TriggerReason};
use crate::errors::Result;
use crate::watch::event_handler::ChangeFilter;
use crate::watch::patterns::WatchProfile;

/// Knobs for turning notifications into change events.
#[derive(Debug, Clone, Copy)]
pub struct WatchSettings {
    /// Notifications within this window of a matching one are folded into it.
    pub debounce: Duration,
    pub use_hash: bool,
}

impl WatchSettings {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            debounce: Duration::from_millis(cfg.watch.debounce_ms),
            use_hash: cfg.watch.use_hash,
        }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(50),
            use_hash: false,
        }
    }
}

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle
/// stops file watching and, once the forwarding task drains, releases its
/// clone of the runtime sender.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a recursive watcher on `root` that sends one
/// `RuntimeEvent::RunTriggered` per (debounced) change of a watched file.
///
/// Must be called inside a Tokio runtime.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    profile: WatchProfile,
    settings: WatchSettings,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or(root);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // Not inside a tracing span here; stderr is all we have.
                    eprintln!("stylepipe: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("stylepipe: file watch error: {err}");
            }
        },
        Config::default(),
    )
    .context("creating file watcher")?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .with_context(|| format!("watching {root:?}"))?;

    info!(root = ?root, patterns = ?profile.patterns(), "file watcher started");

    let mut filter = ChangeFilter::new(root, profile, settings.use_hash);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            let mut changed = filter.accept(&event);
            if changed.is_empty() {
                continue;
            }

            // Fold the rest of the burst (create + modify + close, multiple
            // files saved together) into this one change.
            let deadline = Instant::now() + settings.debounce;
            while let Ok(Some(event)) = timeout_at(deadline, event_rx.recv()).await {
                changed.extend(filter.accept(&event));
            }
            changed.sort();
            changed.dedup();

            if let Err(err) = runtime_tx
                .send(RuntimeEvent::RunTriggered {
                    paths: changed,
                    reason: TriggerReason::FileWatch,
                })
                .await
            {
                warn!("runtime channel closed; stopping watcher loop: {err}");
                return;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
