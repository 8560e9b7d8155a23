// src/exec/backend.rs

//! Pluggable stage executor abstraction.
//!
//! The runtime talks to a `StageExecutor` instead of calling tasks directly.
//! Production uses [`RegistryExecutor`], which starts the named task from the
//! [`TaskRegistry`]; tests provide executors that record the dispatched
//! stages and emit `StageCompleted` events themselves.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::pipeline::ScheduledStage;
use crate::tasks::TaskRegistry;

use super::stage_runner::run_stage;

/// Trait abstracting how scheduled stages are executed.
///
/// Implementations must eventually answer every dispatched stage with a
/// `RuntimeEvent::StageCompleted` carrying the same name and `run_id`;
/// the runtime will not advance the run until they do.
pub trait StageExecutor: Send {
    fn dispatch(
        &mut self,
        stage: ScheduledStage,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Executor backed by the task registry.
///
/// `dispatch` returns as soon as the stage is started; the completion event
/// is sent from a background Tokio task once the task's handle resolves.
pub struct RegistryExecutor {
    registry: Arc<TaskRegistry>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl RegistryExecutor {
    pub fn new(registry: Arc<TaskRegistry>, runtime_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        Self {
            registry,
            runtime_tx,
        }
    }
}

impl StageExecutor for RegistryExecutor {
    fn dispatch(
        &mut self,
        stage: ScheduledStage,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let registry = Arc::clone(&self.registry);
        let tx = self.runtime_tx.clone();

        Box::pin(async move {
            tokio::spawn(run_stage(stage, registry, tx));
            Ok(())
        })
    }
}
