use super::Orchestrator;
use stepwise_core::{Error, Result, StepRef};

/// A flattened, ordered list of leaf invocations for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Task the plan was resolved for
    pub task: String,
    pub steps: Vec<PlannedStep>,
}

impl ExecutionPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Leaf identities in execution order
    pub fn step_names(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.step.to_string()).collect()
    }
}

/// One leaf of an execution plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: StepRef,
    /// Plugin that carries the step out
    pub plugin: String,
    /// Composite tasks the step was reached through, outermost first
    pub via: Vec<String>,
}

impl Orchestrator {
    /// Resolve `name` into its flattened leaf list without running anything
    pub fn plan(&self, name: &str) -> Result<ExecutionPlan> {
        let mut steps = Vec::new();
        let mut stack = Vec::new();
        self.expand(name, None, &mut stack, &mut steps)?;
        Ok(ExecutionPlan {
            task: name.to_string(),
            steps,
        })
    }

    /// Resolve an ad-hoc list of steps nested under `chain`.
    ///
    /// The plan is labelled with the last entry of `chain`. Reaching any
    /// entry of `chain` again, whether a composite task or a leaf step, is a
    /// circular reference.
    pub fn plan_steps(&self, chain: &[String], names: &[String]) -> Result<ExecutionPlan> {
        let label = chain.last().cloned().unwrap_or_default();
        let mut steps = Vec::new();
        let mut stack = chain.to_vec();
        for name in names {
            self.expand(name, Some(label.as_str()), &mut stack, &mut steps)?;
        }

        for planned in &steps {
            let name = planned.step.to_string();
            if let Some(pos) = chain.iter().position(|entry| *entry == name) {
                let mut cycle = planned.via[pos..].to_vec();
                cycle.push(name);
                return Err(Error::circular_dependency(cycle));
            }
        }

        Ok(ExecutionPlan { task: label, steps })
    }

    /// Depth-first expansion of `name` into `out`
    fn expand(
        &self,
        name: &str,
        parent: Option<&str>,
        stack: &mut Vec<String>,
        out: &mut Vec<PlannedStep>,
    ) -> Result<()> {
        let unknown = || match parent {
            Some(parent) => Error::unknown_step(name, parent),
            None => Error::unknown_task(name),
        };

        if let Some(definition) = self.tasks.get(name) {
            if let Some(pos) = stack.iter().position(|entry| entry == name) {
                let mut chain = stack[pos..].to_vec();
                chain.push(name.to_string());
                return Err(Error::circular_dependency(chain));
            }

            stack.push(name.to_string());
            for step in &definition.steps {
                self.expand(step, Some(name), stack, out)?;
            }
            stack.pop();
            return Ok(());
        }

        let step = StepRef::parse(name).map_err(|_| unknown())?;
        let config = &self.context.config;

        match (config.section(&step.kind), &step.target) {
            (Some(section), Some(target)) => {
                if section.get(target).is_none() {
                    return Err(unknown());
                }
                self.require_plugin(&section.plugin, name)?;
                out.push(PlannedStep {
                    step: step.clone(),
                    plugin: section.plugin.clone(),
                    via: stack.clone(),
                });
            }
            (Some(section), None) => {
                self.require_plugin(&section.plugin, name)?;
                for target in section.target_names() {
                    out.push(PlannedStep {
                        step: StepRef::target(&section.kind, target),
                        plugin: section.plugin.clone(),
                        via: stack.clone(),
                    });
                }
            }
            (None, None) if self.plugins.contains(&step.kind) => {
                out.push(PlannedStep {
                    plugin: step.kind.clone(),
                    step: step.clone(),
                    via: stack.clone(),
                });
            }
            _ => return Err(unknown()),
        }

        Ok(())
    }

    fn require_plugin(&self, plugin: &str, step: &str) -> Result<()> {
        if self.plugins.contains(plugin) {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "no plugin registered under '{plugin}' (needed by '{step}')"
            )))
        }
    }
}
