// src/tasks/registry.rs

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ConfigFile;
use crate::errors::{Result, StylepipeError};
use crate::tasks::{CompileTask, MinifyTask, PrefixTask, Task, TaskReport};

/// Name → task mapping.
///
/// Built once at startup and shared (behind an `Arc`) with the executor for
/// the lifetime of the process. Registering a task under an existing name
/// replaces it, which is how tests swap in their own stages.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Arc<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the stock `compile`, `prefix` and `minify` tasks.
    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CompileTask::from_config(cfg, root)));
        registry.register(Arc::new(PrefixTask::from_config(cfg, root)));
        registry.register(Arc::new(MinifyTask::from_config(cfg, root)));
        registry
    }

    /// Add `task`, returning the task previously registered under its name.
    pub fn register(&mut self, task: Arc<dyn Task>) -> Option<Arc<dyn Task>> {
        let name = task.name().to_string();
        debug!(task = %name, "registering task");
        self.tasks.insert(name, task)
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Task>> {
        self.tasks
            .get(name)
            .cloned()
            .ok_or_else(|| StylepipeError::TaskNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(|s| s.as_str())
    }

    /// Start `name` on the blocking pool. Must be called inside a Tokio runtime.
    pub fn start(&self, name: &str) -> Result<TaskHandle> {
        let task = self.get(name)?;
        let inner = tokio::task::spawn_blocking(move || task.run());
        Ok(TaskHandle {
            name: name.to_string(),
            inner,
        })
    }
}

/// Handle to a started task; resolves once the task's output is written.
#[derive(Debug)]
pub struct TaskHandle {
    name: String,
    inner: JoinHandle<Result<TaskReport>>,
}

impl TaskHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn wait(self) -> Result<TaskReport> {
        match self.inner.await {
            Ok(result) => result,
            Err(join_err) => Err(StylepipeError::Other(anyhow!(
                "task '{}' did not run to completion: {join_err}",
                self.name
            ))),
        }
    }
}
