//! Lifecycle of a single task run

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one `run` invocation.
///
/// `Succeeded` and `Failed` are terminal; any transition out of them, or a
/// skipped step such as finishing a run that never started, is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }

    /// Move to `next`, validating the transition
    pub fn transition(self, next: RunState) -> Result<RunState> {
        let allowed = matches!(
            (self, next),
            (RunState::NotStarted, RunState::Running)
                | (RunState::NotStarted, RunState::Failed)
                | (RunState::Running, RunState::Succeeded)
                | (RunState::Running, RunState::Failed)
        );

        if allowed {
            Ok(next)
        } else {
            Err(Error::configuration(format!(
                "invalid run state transition from {self} to {next}"
            )))
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::NotStarted => "not-started",
            RunState::Running => "running",
            RunState::Succeeded => "succeeded",
            RunState::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = RunState::default();
        let state = state.transition(RunState::Running).unwrap();
        let state = state.transition(RunState::Succeeded).unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_resolution_failure_fails_before_running() {
        let state = RunState::NotStarted.transition(RunState::Failed).unwrap();
        assert_eq!(state, RunState::Failed);
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(RunState::Succeeded.transition(RunState::Running).is_err());
        assert!(RunState::Failed.transition(RunState::Succeeded).is_err());
        assert!(RunState::NotStarted.transition(RunState::Succeeded).is_err());
    }
}
