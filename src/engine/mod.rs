// src/engine/mod.rs

//! Orchestration engine for stylepipe.
//!
//! This module ties together:
//! - the run scheduler (which stage comes next)
//! - the trigger queue (what happens when changes arrive while a run is active)
//! - the main runtime event loop that reacts to:
//!   - file-watch triggers
//!   - stage completion events
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

/// Canonical task name type used throughout the engine.
pub type TaskName = String;

/// Outcome of a stage for the scheduler.
///
/// A compile that recovered from a syntax error is a `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    Failed,
}

/// Why a run was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Manual trigger (`--once`, `run_on_start`).
    Manual,
    /// Triggered due to a filesystem event.
    FileWatch,
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// If true, exit the runtime once no run is active and nothing is
    /// queued (used for one-shot builds).
    pub exit_when_idle: bool,
}

/// Events flowing into the runtime from the watcher, executor, etc.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A change was observed; `paths` are relative to the project root.
    RunTriggered {
        paths: Vec<String>,
        reason: TriggerReason,
    },
    /// A stage finished with a concrete outcome.
    StageCompleted {
        stage: TaskName,
        run_id: u64,
        outcome: StageOutcome,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod queue;
pub mod runtime;

pub use self::core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use queue::TriggerQueue;
pub use crate::types::TriggerWhileRunningBehaviour;
pub use runtime::Runtime;
