// src/orchestrator.rs

//! Owns the task registry and the project root, and runs tasks the three
//! ways the CLI needs: a single task, one full pipeline run, or watching.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason};
use crate::errors::Result;
use crate::exec::RegistryExecutor;
use crate::pipeline::{Pipeline, RunStats};
use crate::tasks::{TaskRegistry, TaskReport};
use crate::watch::{spawn_watcher, WatchProfile, WatchSettings};

/// Capacity of the runtime event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct Orchestrator {
    cfg: ConfigFile,
    root: PathBuf,
    pipeline: Pipeline,
    registry: Arc<TaskRegistry>,
}

impl Orchestrator {
    /// Register the stock tasks for `cfg`, resolving paths against `root`.
    pub fn new(cfg: ConfigFile, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let registry = TaskRegistry::from_config(&cfg, &root);
        Self::with_registry(cfg, root, registry)
    }

    pub fn with_registry(cfg: ConfigFile, root: impl Into<PathBuf>, registry: TaskRegistry) -> Self {
        Self {
            cfg,
            root: root.into(),
            pipeline: Pipeline::standard(),
            registry: Arc::new(registry),
        }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.cfg
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Run a single named task and wait for it.
    pub async fn run_task(&self, name: &str) -> Result<TaskReport> {
        info!(task = name, "running single task");
        let report = self.registry.start(name)?.wait().await?;
        info!(task = name, output = ?report.output, "task finished");
        Ok(report)
    }

    /// Run the whole pipeline once and return when it has finished.
    pub async fn run_pipeline_once(&self) -> Result<RunStats> {
        let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(EVENT_CHANNEL_CAPACITY);

        rt_tx
            .send(RuntimeEvent::RunTriggered {
                paths: Vec::new(),
                reason: TriggerReason::Manual,
            })
            .await
            .map_err(anyhow::Error::from)?;

        let runtime = self.runtime(rt_tx, rt_rx, RuntimeOptions { exit_when_idle: true });
        runtime.run().await
    }

    /// Watch the source tree until Ctrl-C.
    pub async fn watch(&self) -> Result<RunStats> {
        let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(EVENT_CHANNEL_CAPACITY);

        // Ctrl-C → graceful shutdown.
        {
            let tx = rt_tx.clone();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("failed to listen for Ctrl+C: {e}");
                    return;
                }
                let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
            });
        }

        self.watch_with_channel(rt_tx, rt_rx).await
    }

    /// Watch using a caller-provided event channel.
    ///
    /// Returns once a `ShutdownRequested` event arrives; the watcher is torn
    /// down before returning.
    pub async fn watch_with_channel(
        &self,
        rt_tx: mpsc::Sender<RuntimeEvent>,
        rt_rx: mpsc::Receiver<RuntimeEvent>,
    ) -> Result<RunStats> {
        let profile = WatchProfile::from_config(&self.cfg)?;
        let settings = WatchSettings::from_config(&self.cfg);
        let watcher = spawn_watcher(&self.root, profile, settings, rt_tx.clone())?;

        if self.cfg.config.run_on_start {
            rt_tx
                .send(RuntimeEvent::RunTriggered {
                    paths: Vec::new(),
                    reason: TriggerReason::Manual,
                })
                .await
                .map_err(anyhow::Error::from)?;
        }

        let runtime = self.runtime(rt_tx, rt_rx, RuntimeOptions::default());
        let stats = runtime.run().await;

        drop(watcher);
        info!("file watcher stopped");
        stats
    }

    fn runtime(
        &self,
        rt_tx: mpsc::Sender<RuntimeEvent>,
        rt_rx: mpsc::Receiver<RuntimeEvent>,
        options: RuntimeOptions,
    ) -> Runtime<RegistryExecutor> {
        let core = CoreRuntime::new(
            self.pipeline.clone(),
            self.cfg.config.triggered_while_running_behaviour,
            self.cfg.config.queue_length,
            options,
        );
        let executor = RegistryExecutor::new(Arc::clone(&self.registry), rt_tx);
        Runtime::new(core, rt_rx, executor)
    }
}
