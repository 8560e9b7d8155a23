use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use stylepipe::engine::{RuntimeEvent, StageOutcome};
use stylepipe::errors::Result;
use stylepipe::exec::StageExecutor;
use stylepipe::pipeline::ScheduledStage;

/// A fake executor that:
/// - records which stages were dispatched, in order
/// - immediately reports `StageCompleted` for each of them, `Failed` for the
///   stage configured with [`FakeStageExecutor::failing`] and `Success`
///   otherwise.
pub struct FakeStageExecutor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    executed: Arc<Mutex<Vec<ScheduledStage>>>,
    failing: Option<String>,
}

impl FakeStageExecutor {
    pub fn new(
        runtime_tx: mpsc::Sender<RuntimeEvent>,
        executed: Arc<Mutex<Vec<ScheduledStage>>>,
    ) -> Self {
        Self {
            runtime_tx,
            executed,
            failing: None,
        }
    }

    /// Report every dispatch of `stage` as failed.
    pub fn failing(mut self, stage: &str) -> Self {
        self.failing = Some(stage.to_string());
        self
    }
}

impl StageExecutor for FakeStageExecutor {
    fn dispatch(
        &mut self,
        stage: ScheduledStage,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let executed = Arc::clone(&self.executed);
        let outcome = if self.failing.as_deref() == Some(stage.name.as_str()) {
            StageOutcome::Failed
        } else {
            StageOutcome::Success
        };

        Box::pin(async move {
            {
                let mut guard = executed.lock().unwrap();
                guard.push(stage.clone());
            }

            tx.send(RuntimeEvent::StageCompleted {
                stage: stage.name,
                run_id: stage.run_id,
                outcome,
            })
            .await
            .map_err(anyhow::Error::from)?;
            Ok(())
        })
    }
}

/// Stage names from a recorded dispatch log.
pub fn stage_names(executed: &Arc<Mutex<Vec<ScheduledStage>>>) -> Vec<String> {
    executed
        .lock()
        .unwrap()
        .iter()
        .map(|s| s.name.clone())
        .collect()
}
