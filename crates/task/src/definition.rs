//! Task definitions and run results
//!
//! A `TaskDefinition` is a named, ordered list of step names. Steps are kept
//! as written; resolving them against configuration and plugins happens
//! only when a task is run.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stepwise_core::RunState;

/// A composite task registered with the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Task name
    pub name: String,
    /// Step names in declared order (composite names or leaf references)
    pub steps: Vec<String>,
}

impl TaskDefinition {
    pub fn new<I, S>(name: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}

/// What happened to one leaf during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Leaf identity, `kind` or `kind:target`
    pub step: String,
    /// 1-based position in the flattened plan
    pub position: usize,
    pub duration: Duration,
    /// The step was resolved but not invoked (dry run)
    pub skipped: bool,
}

/// Result of a successful `run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Task that was requested
    pub task: String,
    pub state: RunState,
    /// Completed leaves in execution order
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step.as_str()).collect()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_from_str_slices() {
        let def = TaskDefinition::new("build", ["clean", "compile"]);
        assert_eq!(def.name, "build");
        assert_eq!(def.steps, vec!["clean", "compile"]);
    }

    #[test]
    fn test_report_totals() {
        let report = RunReport {
            task: "t".into(),
            state: RunState::Succeeded,
            steps: vec![
                StepOutcome {
                    step: "a".into(),
                    position: 1,
                    duration: Duration::from_millis(5),
                    skipped: false,
                },
                StepOutcome {
                    step: "b:x".into(),
                    position: 2,
                    duration: Duration::from_millis(7),
                    skipped: false,
                },
            ],
        };
        assert_eq!(report.step_names(), vec!["a", "b:x"]);
        assert_eq!(report.total_duration(), Duration::from_millis(12));
    }
}
