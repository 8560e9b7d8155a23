// src/exec/mod.rs

//! Stage execution layer.
//!
//! - [`backend`] provides the `StageExecutor` trait and the production
//!   `RegistryExecutor`, which tests can replace with a fake implementation.
//! - [`stage_runner`] runs one stage from the task registry and reports its
//!   outcome back to the runtime as a `RuntimeEvent`.

pub mod backend;
pub mod stage_runner;

pub use backend::{RegistryExecutor, StageExecutor};
pub use stage_runner::run_stage;
