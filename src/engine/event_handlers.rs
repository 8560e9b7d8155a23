// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, info};

use crate::engine::queue::TriggerQueue;
use crate::engine::{RuntimeOptions, StageOutcome, TaskName, TriggerReason};
use crate::pipeline::{CompletionStep, RunEnd, RunScheduler, ScheduledStage};
use crate::types::TriggerWhileRunningBehaviour;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Hand this stage to the executor.
    StartStage(ScheduledStage),
    /// A run ended (for reporting only).
    RunFinished(RunEnd),
    /// Request that the process exits (one-shot builds once idle).
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn continue_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Handle a change trigger.
///
/// - Idle: start a run right away.
/// - Running, `queue` mode: remember the trigger for a follow-up run.
/// - Running, `cancel` mode: supersede the active run and keep only this
///   trigger; the fresh run starts as soon as the stage in flight finishes.
pub fn handle_run_trigger(
    scheduler: &mut RunScheduler,
    queue: &mut TriggerQueue,
    options: &RuntimeOptions,
    paths: Vec<String>,
    reason: TriggerReason,
) -> CoreStep {
    info!(?reason, ?paths, "run triggered");

    if scheduler.is_idle() {
        // Anything still queued is covered by the run we are about to start.
        let folded = queue.clear();
        if folded > 0 {
            debug!(folded, "folded queued triggers into new run");
        }
        let commands = start_run(scheduler);
        return exit_if_idle(scheduler, queue, options, commands);
    }

    if queue.behaviour() == TriggerWhileRunningBehaviour::Cancel {
        scheduler.supersede();
    }
    queue.record_trigger(&paths);

    CoreStep::continue_with(Vec::new())
}

/// Handle a stage completion.
pub fn handle_stage_completion(
    scheduler: &mut RunScheduler,
    queue: &mut TriggerQueue,
    options: &RuntimeOptions,
    stage: TaskName,
    run_id: u64,
    outcome: StageOutcome,
) -> CoreStep {
    let mut commands = Vec::new();

    match scheduler.handle_completion(&stage, run_id, outcome) {
        CompletionStep::Next(next) => commands.push(CoreCommand::StartStage(next)),
        CompletionStep::Finished(end) => {
            commands.push(CoreCommand::RunFinished(end));
            commands.extend(maybe_start_queued_run(scheduler, queue));
        }
        CompletionStep::Ignored => {}
    }

    exit_if_idle(scheduler, queue, options, commands)
}

/// One-shot mode: exit when no run is active and nothing is queued.
fn exit_if_idle(
    scheduler: &RunScheduler,
    queue: &TriggerQueue,
    options: &RuntimeOptions,
    mut commands: Vec<CoreCommand>,
) -> CoreStep {
    let mut keep_running = true;
    if options.exit_when_idle && scheduler.is_idle() && queue.is_empty() {
        keep_running = false;
        commands.push(CoreCommand::RequestExit);
    }

    CoreStep {
        commands,
        keep_running,
    }
}

fn start_run(scheduler: &mut RunScheduler) -> Vec<CoreCommand> {
    scheduler
        .start_run()
        .map(CoreCommand::StartStage)
        .into_iter()
        .collect()
}

/// If the scheduler is idle and a follow-up run is queued, start it.
fn maybe_start_queued_run(
    scheduler: &mut RunScheduler,
    queue: &mut TriggerQueue,
) -> Vec<CoreCommand> {
    if !scheduler.is_idle() {
        return Vec::new();
    }

    match queue.pop_next() {
        Some(paths) => {
            debug!(?paths, "starting queued follow-up run");
            start_run(scheduler)
        }
        None => Vec::new(),
    }
}
