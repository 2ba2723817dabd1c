use super::{ExecutionContext, Orchestrator};
use crate::definition::{RunReport, TaskDefinition};
use crate::plugin::{NestedRunner, PluginRegistry};
use crate::registry::TaskRegistry;
use async_trait::async_trait;
use stepwise_config::validate_task_name;
use stepwise_core::{Error, Result};

impl Orchestrator {
    /// Create an orchestrator with no composite tasks registered
    pub fn new(context: ExecutionContext, plugins: PluginRegistry) -> Self {
        Self {
            context,
            plugins,
            tasks: TaskRegistry::new(),
        }
    }

    /// Create an orchestrator and register every task of the build file,
    /// in file order
    pub fn from_config(context: ExecutionContext, plugins: PluginRegistry) -> Result<Self> {
        let tasks: Vec<(String, Vec<String>)> = context
            .config
            .tasks()
            .iter()
            .map(|(name, steps)| (name.clone(), steps.clone()))
            .collect();

        let mut orchestrator = Self::new(context, plugins);
        for (name, steps) in tasks {
            orchestrator.register_task(name, steps)?;
        }
        Ok(orchestrator)
    }

    /// Declare a composite task.
    ///
    /// Names must be unique across composite tasks, configured target-kinds
    /// and registered plugins. On failure the existing registration stays.
    pub fn register_task<I, S>(&mut self, name: impl Into<String>, steps: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let definition = TaskDefinition::new(name, steps);
        validate_task_name(&definition.name)?;

        if self.plugins.contains(&definition.name)
            || self.context.config.section(&definition.name).is_some()
        {
            return Err(Error::duplicate_task(definition.name));
        }

        tracing::debug!(task = %definition.name, steps = ?definition.steps, "Registered task");
        self.tasks.register(definition)
    }

    /// Resolve `name` and run its leaves in order.
    ///
    /// Resolution errors are reported before any step runs.
    pub async fn run(&self, name: &str) -> Result<RunReport> {
        let plan = self.plan(name).map_err(|e| {
            tracing::error!(task = %name, error = %e, "Failed to resolve task");
            e
        })?;
        self.execute_plan(&plan).await
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }
}

#[async_trait]
impl NestedRunner for Orchestrator {
    fn check_steps(&self, chain: &[String], steps: &[String]) -> Result<()> {
        self.plan_steps(chain, steps).map(|_| ())
    }

    async fn run_steps(&self, chain: &[String], steps: &[String]) -> Result<RunReport> {
        let plan = self.plan_steps(chain, steps)?;
        self.execute_plan(&plan).await
    }
}
