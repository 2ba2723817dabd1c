use super::plan::{ExecutionPlan, PlannedStep};
use super::Orchestrator;
use crate::definition::{RunReport, StepOutcome};
use crate::plugin::Invocation;
use std::time::Instant;
use stepwise_core::{Error, Result, RunState};
use stepwise_utils::tracing::{pipeline_span, task_completed, task_span};
use tracing::Instrument;

impl Orchestrator {
    /// Run every leaf of `plan` in order, stopping at the first failure
    pub(crate) async fn execute_plan(&self, plan: &ExecutionPlan) -> Result<RunReport> {
        let span = pipeline_span(&plan.task, plan.len());
        self.execute_plan_inner(plan).instrument(span).await
    }

    async fn execute_plan_inner(&self, plan: &ExecutionPlan) -> Result<RunReport> {
        let state = RunState::NotStarted.transition(RunState::Running)?;

        tracing::info!(
            task = %plan.task,
            total_steps = plan.len(),
            dry_run = self.context.dry_run,
            "Starting task pipeline"
        );

        let mut outcomes = Vec::with_capacity(plan.len());
        for (index, planned) in plan.steps.iter().enumerate() {
            let position = index + 1;
            let step_name = planned.step.to_string();
            let started = Instant::now();

            let result = self
                .invoke_step(planned)
                .instrument(task_span(&step_name, position))
                .await;

            let duration = started.elapsed();
            let duration_ms = duration.as_millis() as u64;

            match result {
                Ok(skipped) => {
                    task_completed(&step_name, duration_ms, true);
                    outcomes.push(StepOutcome {
                        step: step_name,
                        position,
                        duration,
                        skipped,
                    });
                }
                Err(e) => {
                    task_completed(&step_name, duration_ms, false);
                    let state = state.transition(RunState::Failed)?;
                    tracing::error!(
                        task = %plan.task,
                        step = %step_name,
                        position,
                        remaining = plan.len() - position,
                        state = %state,
                        error = %e,
                        "Task pipeline failed"
                    );
                    return Err(Error::task_execution(&plan.task, step_name, position, e));
                }
            }
        }

        let state = state.transition(RunState::Succeeded)?;
        tracing::info!(task = %plan.task, steps = outcomes.len(), "Task pipeline completed");

        Ok(RunReport {
            task: plan.task.clone(),
            state,
            steps: outcomes,
        })
    }

    /// Invoke one leaf; returns whether it was skipped
    async fn invoke_step(&self, planned: &PlannedStep) -> Result<bool> {
        let options = planned
            .step
            .target
            .as_deref()
            .and_then(|target| self.context.config.target(&planned.step.kind, target));

        if self.context.dry_run {
            tracing::info!(plugin = %planned.plugin, via = ?planned.via, "Dry run, not invoking");
            return Ok(true);
        }

        let plugin = self.plugins.get(&planned.plugin).ok_or_else(|| {
            Error::configuration(format!("no plugin registered under '{}'", planned.plugin))
        })?;

        tracing::info!(plugin = %planned.plugin, via = ?planned.via, "Running step");

        let mut chain = planned.via.clone();
        chain.push(planned.step.to_string());
        plugin
            .invoke(Invocation {
                step: &planned.step,
                options,
                context: &self.context,
                runner: self,
                chain: &chain,
            })
            .await?;

        Ok(false)
    }
}
