// src/pipeline/scheduler.rs

use tracing::{debug, info, warn};

use crate::engine::StageOutcome;
use crate::pipeline::stages::{Pipeline, ScheduledStage};

/// The run currently in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRun {
    pub run_id: u64,
    /// Index of the stage in flight.
    pub stage_index: usize,
    /// Set when a newer trigger cancelled this run; the stage in flight is
    /// allowed to finish but nothing after it starts.
    pub superseded: bool,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed { stage: String },
    Superseded { after_stage: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEnd {
    pub run_id: u64,
    pub status: RunStatus,
}

/// Result of feeding a stage completion into the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionStep {
    /// The next stage of the same run is ready.
    Next(ScheduledStage),
    /// The run is over; the scheduler is idle again.
    Finished(RunEnd),
    /// Stale or unexpected completion; nothing changed.
    Ignored,
}

/// Counters over the lifetime of a scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub started: u64,
    pub completed: u64,
    pub failed: u64,
    pub superseded: u64,
}

/// Sequential run state machine.
///
/// `Idle → start_run → Running{0} → … → Running{n-1} → Idle`. The scheduler
/// never hands out a stage while another one is in flight.
#[derive(Debug)]
pub struct RunScheduler {
    pipeline: Pipeline,
    active: Option<ActiveRun>,
    run_counter: u64,
    stats: RunStats,
}

impl RunScheduler {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            active: None,
            run_counter: 0,
            stats: RunStats::default(),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn active_run(&self) -> Option<&ActiveRun> {
        self.active.as_ref()
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Begin a new run and return its first stage.
    ///
    /// Returns `None` when a run is already active, or when the pipeline has
    /// no stages (the run then counts as completed immediately).
    pub fn start_run(&mut self) -> Option<ScheduledStage> {
        if let Some(active) = &self.active {
            warn!(run_id = active.run_id, "start_run called while a run is active; ignoring");
            return None;
        }

        self.run_counter += 1;
        self.stats.started += 1;
        let run_id = self.run_counter;

        let Some(first) = self.pipeline.stage(0) else {
            debug!(run_id, "empty pipeline; run completes immediately");
            self.stats.completed += 1;
            return None;
        };

        info!(run_id, "starting pipeline run");
        let stage = ScheduledStage {
            name: first.to_string(),
            run_id,
            index: 0,
        };
        self.active = Some(ActiveRun {
            run_id,
            stage_index: 0,
            superseded: false,
        });
        Some(stage)
    }

    /// Mark the active run as superseded. Returns `false` when idle.
    pub fn supersede(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                if !active.superseded {
                    debug!(run_id = active.run_id, "run superseded by newer trigger");
                }
                active.superseded = true;
                true
            }
            None => false,
        }
    }

    /// Feed a stage completion into the state machine.
    pub fn handle_completion(
        &mut self,
        stage: &str,
        run_id: u64,
        outcome: StageOutcome,
    ) -> CompletionStep {
        let Some(active) = self.active.as_ref() else {
            warn!(stage, run_id, "stage completed while no run is active; ignoring");
            return CompletionStep::Ignored;
        };

        let expected = self.pipeline.stage(active.stage_index).unwrap_or_default();
        if active.run_id != run_id || expected != stage {
            warn!(
                stage,
                run_id,
                active_run = active.run_id,
                expected_stage = expected,
                "completion does not match the stage in flight; ignoring"
            );
            return CompletionStep::Ignored;
        }

        let superseded = active.superseded;
        let next_index = active.stage_index + 1;

        let status = match outcome {
            StageOutcome::Failed => Some(RunStatus::Failed {
                stage: stage.to_string(),
            }),
            StageOutcome::Success if superseded => Some(RunStatus::Superseded {
                after_stage: stage.to_string(),
            }),
            StageOutcome::Success if next_index >= self.pipeline.len() => {
                Some(RunStatus::Completed)
            }
            StageOutcome::Success => None,
        };

        if let Some(status) = status {
            self.active = None;
            match status {
                RunStatus::Completed => self.stats.completed += 1,
                RunStatus::Failed { .. } => self.stats.failed += 1,
                RunStatus::Superseded { .. } => self.stats.superseded += 1,
            }
            info!(run_id, ?status, "pipeline run finished");
            return CompletionStep::Finished(RunEnd { run_id, status });
        }

        let name = self.pipeline.stage(next_index).unwrap_or_default().to_string();
        if let Some(active) = self.active.as_mut() {
            active.stage_index = next_index;
        }
        debug!(run_id, stage = %name, index = next_index, "advancing to next stage");

        CompletionStep::Next(ScheduledStage {
            name,
            run_id,
            index: next_index,
        })
    }
}
