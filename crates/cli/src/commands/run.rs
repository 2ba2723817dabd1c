use crate::display::{muted, success, use_color};
use stepwise_core::Result;
use stepwise_task::Orchestrator;

pub async fn execute(orchestrator: &Orchestrator, task: &str) -> Result<()> {
    let report = orchestrator.run(task).await?;
    let color = use_color();

    let verb = if orchestrator.context().dry_run {
        "Resolved"
    } else {
        "Done"
    };
    let summary = format!(
        "{verb} '{}': {} step(s) in {} ms",
        report.task,
        report.steps.len(),
        report.total_duration().as_millis()
    );
    println!("{}", success(&summary, color));

    if orchestrator.context().dry_run {
        for outcome in &report.steps {
            println!(
                "  {:>3}. {} {}",
                outcome.position,
                outcome.step,
                muted("(skipped)", color)
            );
        }
    }

    Ok(())
}
