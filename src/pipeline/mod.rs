// src/pipeline/mod.rs

//! Pipeline definition and per-run scheduling.
//!
//! - [`stages`] holds the fixed, ordered list of stage names.
//! - [`scheduler`] contains the run state machine: at most one run is
//!   active, and within it stage N+1 is only handed out once stage N has
//!   completed.

pub mod scheduler;
pub mod stages;

pub use scheduler::{ActiveRun, CompletionStep, RunEnd, RunScheduler, RunStats, RunStatus};
pub use stages::{Pipeline, ScheduledStage};
