// src/exec/stage_runner.rs

//! Runs a single stage and reports its outcome to the runtime.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::engine::{RuntimeEvent, StageOutcome};
use crate::pipeline::ScheduledStage;
use crate::tasks::TaskRegistry;

/// Start `stage` from the registry, wait for it, and send `StageCompleted`.
///
/// Every error (unknown task, IO, prefix/minify failure, panicked task) is
/// logged and turned into `StageOutcome::Failed`, which aborts the run.
pub async fn run_stage(
    stage: ScheduledStage,
    registry: Arc<TaskRegistry>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    info!(stage = %stage.name, run_id = stage.run_id, "starting stage");

    let result = match registry.start(&stage.name) {
        Ok(handle) => handle.wait().await,
        Err(err) => Err(err),
    };

    let outcome = match result {
        Ok(report) => {
            match &report.output {
                Some(path) => debug!(
                    stage = %stage.name,
                    run_id = stage.run_id,
                    output = ?path,
                    bytes = report.output_bytes,
                    "stage wrote output"
                ),
                None => warn!(
                    stage = %stage.name,
                    run_id = stage.run_id,
                    "stage finished without writing output"
                ),
            }
            StageOutcome::Success
        }
        Err(err) => {
            error!(
                stage = %stage.name,
                run_id = stage.run_id,
                error = %err,
                "stage failed"
            );
            StageOutcome::Failed
        }
    };

    if let Err(err) = runtime_tx
        .send(RuntimeEvent::StageCompleted {
            stage: stage.name.clone(),
            run_id: stage.run_id,
            outcome,
        })
        .await
    {
        warn!(stage = %stage.name, "runtime channel closed before completion was delivered: {err}");
    }
}
