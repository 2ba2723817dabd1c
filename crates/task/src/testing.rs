//! Instrumented plugins for exercising the orchestrator in tests

use crate::plugin::{Invocation, Plugin};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use stepwise_core::{Error, Result};

/// Shared, ordered log of invoked step identities
#[derive(Debug, Clone, Default)]
pub struct InvocationLog(Arc<Mutex<Vec<String>>>);

impl InvocationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, step: String) {
        if let Ok(mut guard) = self.0.lock() {
            guard.push(step);
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

/// Plugin that records every invocation and fails on chosen steps
#[derive(Debug, Clone)]
pub struct RecordingPlugin {
    name: String,
    log: InvocationLog,
    failing: HashSet<String>,
}

impl RecordingPlugin {
    pub fn new(name: impl Into<String>, log: &InvocationLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            failing: HashSet::new(),
        }
    }

    /// Make invocations of `step` (a `kind` or `kind:target` identity) fail
    pub fn failing_on(mut self, step: impl Into<String>) -> Self {
        self.failing.insert(step.into());
        self
    }
}

#[async_trait]
impl Plugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let step = invocation.step.to_string();
        self.log.record(step.clone());
        if self.failing.contains(&step) {
            return Err(Error::plugin(&self.name, format!("{step} failed on purpose")));
        }
        Ok(())
    }
}
