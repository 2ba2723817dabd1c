use crate::display::{heading, muted, use_color};
use std::fmt::Write;
use stepwise_task::Orchestrator;

pub fn execute(orchestrator: &Orchestrator) {
    print!("{}", render(orchestrator, use_color()));
}

/// Composite tasks, then target-kinds with their sub-targets, then plugins
/// usable as bare steps
fn render(orchestrator: &Orchestrator, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading("Tasks", color));
    if orchestrator.tasks().is_empty() {
        let _ = writeln!(out, "  {}", muted("(none)", color));
    }
    for task in orchestrator.tasks().iter() {
        let _ = writeln!(out, "  {}: {}", task.name, task.steps.join(", "));
    }

    let sections = orchestrator.context().config.sections();
    let _ = writeln!(out, "\n{}", heading("Targets", color));
    if sections.is_empty() {
        let _ = writeln!(out, "  {}", muted("(none)", color));
    }
    for section in sections.values() {
        let plugin = if section.plugin == section.kind {
            String::new()
        } else {
            format!(" {}", muted(&format!("({})", section.plugin), color))
        };
        let targets = section.target_names().collect::<Vec<_>>().join(", ");
        let _ = writeln!(out, "  {}{plugin}: {targets}", section.kind);
    }

    let _ = writeln!(out, "\n{}", heading("Plugins", color));
    let plugins = orchestrator.plugins().names().collect::<Vec<_>>().join(", ");
    let _ = writeln!(out, "  {plugins}");

    out
}
