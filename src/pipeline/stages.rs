// src/pipeline/stages.rs

use crate::engine::TaskName;
use crate::tasks::{COMPILE, MINIFY, PREFIX};

/// Ordered stage names of a run. Never reordered after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<TaskName>,
}

impl Pipeline {
    pub fn new<I, S>(stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskName>,
    {
        Self {
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }

    /// compile → prefix → minify.
    pub fn standard() -> Self {
        Self::new([COMPILE, PREFIX, MINIFY])
    }

    pub fn stages(&self) -> &[TaskName] {
        &self.stages
    }

    pub fn stage(&self, index: usize) -> Option<&str> {
        self.stages.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// A stage handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledStage {
    pub name: TaskName,
    pub run_id: u64,
    /// Position within the pipeline.
    pub index: usize,
}
