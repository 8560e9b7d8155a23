// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::StageExecutor;
use crate::pipeline::{RunStats, RunStatus};

use super::core::CoreRuntime;
use super::{CoreCommand, RuntimeEvent};

/// Drives the run scheduler in response to `RuntimeEvent`s and delegates the
/// actual stage work to a `StageExecutor`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// runtime semantics.
pub struct Runtime<E: StageExecutor> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    executor: E,
}

impl<E: StageExecutor> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<E: StageExecutor> Runtime<E> {
    pub fn new(core: CoreRuntime, event_rx: mpsc::Receiver<RuntimeEvent>, executor: E) -> Self {
        Self {
            core,
            event_rx,
            executor,
        }
    }

    /// Main event loop. Returns the run counters once the loop stops.
    pub async fn run(mut self) -> Result<RunStats> {
        info!("stylepipe runtime started");

        loop {
            let Some(event) = self.event_rx.recv().await else {
                info!("runtime event channel closed; exiting");
                break;
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        let stats = self.core.stats();
        info!(?stats, "runtime exiting");
        Ok(stats)
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::StartStage(stage) => {
                debug!(stage = %stage.name, run_id = stage.run_id, "dispatching stage");
                self.executor.dispatch(stage).await?;
            }
            CoreCommand::RunFinished(end) => match end.status {
                RunStatus::Completed => info!(run_id = end.run_id, "run completed"),
                RunStatus::Failed { stage } => {
                    warn!(run_id = end.run_id, %stage, "run aborted after stage failure")
                }
                RunStatus::Superseded { after_stage } => {
                    info!(run_id = end.run_id, %after_stage, "run superseded by a newer change")
                }
            },
            CoreCommand::RequestExit => {
                debug!("core issued RequestExit command");
            }
        }
        Ok(())
    }
}
