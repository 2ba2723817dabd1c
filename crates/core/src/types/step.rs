//! Leaf step references

use crate::constants::TARGET_SEPARATOR;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A leaf invocation: a target-kind plus an optional sub-target.
///
/// `copy:samples` names the `samples` sub-target of the `copy` kind, while a
/// bare `clean` names the kind as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepRef {
    pub kind: String,
    pub target: Option<String>,
}

impl StepRef {
    /// Reference a whole target-kind
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: None,
        }
    }

    /// Reference one sub-target of a target-kind
    pub fn target(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: Some(target.into()),
        }
    }

    /// Parse a step name, splitting on the first `:`
    pub fn parse(name: &str) -> Result<Self> {
        match name.split_once(TARGET_SEPARATOR) {
            Some((kind, target)) => {
                if kind.is_empty() || target.is_empty() {
                    return Err(Error::configuration(format!(
                        "step '{name}' must have the form 'kind:target'"
                    )));
                }
                Ok(Self::target(kind, target))
            }
            None if name.is_empty() => Err(Error::configuration("step name cannot be empty")),
            None => Ok(Self::kind(name)),
        }
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }
}

impl Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{}{}{}", self.kind, TARGET_SEPARATOR, target),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for StepRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
