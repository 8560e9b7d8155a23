// src/engine/queue.rs

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::types::TriggerWhileRunningBehaviour;

/// Changes observed while a run is executing, waiting for their own run.
///
/// Semantics:
/// - Each queued entry is a *batch* of changed paths; one batch becomes one
///   follow-up run.
/// - `Queue` mode keeps up to `max_runs` batches. Once full, later triggers
///   are merged into the newest batch, so with the default of 1 any number
///   of mid-run changes produces exactly one follow-up run.
/// - `Cancel` mode keeps only the latest trigger.
#[derive(Debug)]
pub struct TriggerQueue {
    behaviour: TriggerWhileRunningBehaviour,
    max_runs: usize,
    runs: VecDeque<BTreeSet<String>>,
}

impl TriggerQueue {
    /// `max_runs` is clamped to at least 1.
    pub fn new(behaviour: TriggerWhileRunningBehaviour, max_runs: usize) -> Self {
        Self {
            behaviour,
            max_runs: max_runs.max(1),
            runs: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of follow-up runs currently queued.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn behaviour(&self) -> TriggerWhileRunningBehaviour {
        self.behaviour
    }

    /// Record a trigger that arrived while a run is in progress.
    pub fn record_trigger(&mut self, paths: &[String]) {
        let batch: BTreeSet<String> = paths.iter().cloned().collect();

        match self.behaviour {
            TriggerWhileRunningBehaviour::Queue => {
                if self.runs.len() < self.max_runs {
                    debug!(paths = ?batch, queued = self.runs.len() + 1, "queued follow-up run");
                    self.runs.push_back(batch);
                } else if let Some(last) = self.runs.back_mut() {
                    debug!(
                        paths = ?batch,
                        max_runs = self.max_runs,
                        "queue full; merged trigger into newest queued run"
                    );
                    last.extend(batch);
                }
            }
            TriggerWhileRunningBehaviour::Cancel => {
                debug!(paths = ?batch, "keeping only the latest trigger (cancel mode)");
                self.runs.clear();
                self.runs.push_back(batch);
            }
        }
    }

    /// Take the oldest queued batch.
    pub fn pop_next(&mut self) -> Option<Vec<String>> {
        let batch = self.runs.pop_front()?;
        debug!(remaining = self.runs.len(), "dequeued follow-up run");
        Some(batch.into_iter().collect())
    }

    /// Drop everything queued, returning how many runs were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.runs.len();
        self.runs.clear();
        dropped
    }
}
