// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for reading
//! events from channels, handing stages to the executor and reacting to
//! shutdown. The core has no Tokio types and performs no IO, so it can be
//! driven step by step in tests.

use tracing::info;

use crate::engine::event_handlers::{handle_run_trigger, handle_stage_completion, CoreStep};
use crate::engine::queue::TriggerQueue;
use crate::engine::{RuntimeEvent, RuntimeOptions};
use crate::pipeline::{Pipeline, RunScheduler, RunStats};
use crate::types::TriggerWhileRunningBehaviour;

#[derive(Debug)]
pub struct CoreRuntime {
    scheduler: RunScheduler,
    queue: TriggerQueue,
    options: RuntimeOptions,
}

impl CoreRuntime {
    pub fn new(
        pipeline: Pipeline,
        behaviour: TriggerWhileRunningBehaviour,
        queue_length: usize,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            scheduler: RunScheduler::new(pipeline),
            queue: TriggerQueue::new(behaviour, queue_length),
            options,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queued_runs(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> RunStats {
        self.scheduler.stats()
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::RunTriggered { paths, reason } => handle_run_trigger(
                &mut self.scheduler,
                &mut self.queue,
                &self.options,
                paths,
                reason,
            ),
            RuntimeEvent::StageCompleted {
                stage,
                run_id,
                outcome,
            } => handle_stage_completion(
                &mut self.scheduler,
                &mut self.queue,
                &self.options,
                stage,
                run_id,
                outcome,
            ),
            RuntimeEvent::ShutdownRequested => {
                let dropped = self.queue.clear();
                info!(dropped_queued_runs = dropped, "shutdown requested");
                CoreStep {
                    commands: Vec::new(),
                    keep_running: false,
                }
            }
        }
    }
}
