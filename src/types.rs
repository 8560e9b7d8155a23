use std::str::FromStr;

use serde::Deserialize;

/// Behaviour when a change is observed while a pipeline run is in progress.
///
/// - `Queue`: remember the trigger and start a follow-up run when the current
///   one finishes (default behaviour).
/// - `Cancel`: supersede the current run. The stage in flight finishes, the
///   remaining stages are skipped and a fresh run starts from the first stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TriggerWhileRunningBehaviour {
    #[default]
    Queue,
    Cancel,
}

impl FromStr for TriggerWhileRunningBehaviour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "queue" => Ok(TriggerWhileRunningBehaviour::Queue),
            "cancel" => Ok(TriggerWhileRunningBehaviour::Cancel),
            other => Err(format!(
                "invalid triggered_while_running_behaviour: {other} (expected \"queue\" or \"cancel\")"
            )),
        }
    }
}

/// Output style of the SASS compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompileStyle {
    #[default]
    Expanded,
    Compressed,
}

impl From<CompileStyle> for grass::OutputStyle {
    fn from(style: CompileStyle) -> Self {
        match style {
            CompileStyle::Expanded => grass::OutputStyle::Expanded,
            CompileStyle::Compressed => grass::OutputStyle::Compressed,
        }
    }
}
