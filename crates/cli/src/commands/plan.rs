use crate::display::{heading, muted, use_color};
use std::fmt::Write;
use stepwise_core::Result;
use stepwise_task::{ExecutionPlan, Orchestrator};

pub fn execute(orchestrator: &Orchestrator, task: &str) -> Result<()> {
    let plan = orchestrator.plan(task)?;
    print!("{}", render(&plan, use_color()));
    Ok(())
}

fn render(plan: &ExecutionPlan, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        heading(&format!("{} ({} steps)", plan.task, plan.len()), color)
    );

    for (index, planned) in plan.steps.iter().enumerate() {
        let mut detail = planned.plugin.clone();
        if !planned.via.is_empty() {
            let _ = write!(detail, " via {}", planned.via.join(" > "));
        }
        let _ = writeln!(
            out,
            "  {:>3}. {} {}",
            index + 1,
            planned.step,
            muted(&format!("[{detail}]"), color)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::StepRef;
    use stepwise_task::PlannedStep;

    #[test]
    fn test_plan_rendering() {
        let plan = ExecutionPlan {
            task: "dist".into(),
            steps: vec![
                PlannedStep {
                    step: StepRef::target("concat", "axiom"),
                    plugin: "concat".into(),
                    via: vec!["dist".into()],
                },
                PlannedStep {
                    step: StepRef::target("karma", "once"),
                    plugin: "exec".into(),
                    via: vec!["dist".into(), "test".into()],
                },
            ],
        };

        assert_eq!(
            render(&plan, false),
            "dist (2 steps)\n    1. concat:axiom [concat via dist]\n    2. karma:once [exec via dist > test]\n"
        );
    }
}
