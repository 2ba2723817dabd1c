mod api;
mod context;
mod pipeline;
mod plan;

pub use context::ExecutionContext;
pub use plan::{ExecutionPlan, PlannedStep};

use crate::plugin::PluginRegistry;
use crate::registry::TaskRegistry;

/// Resolves task names into leaf plans and runs them through plugins.
///
/// Leaves run strictly one after another; the first failure ends the run.
#[derive(Debug)]
pub struct Orchestrator {
    pub(crate) context: ExecutionContext,
    pub(crate) plugins: PluginRegistry,
    pub(crate) tasks: TaskRegistry,
}
