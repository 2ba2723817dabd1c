use std::io::IsTerminal;
use stepwise_core::STEPWISE_LOG_VAR;
use tracing::{error, info, span, Level, Span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// The filter comes from `STEPWISE_LOG`, then `RUST_LOG`, then from the
/// command-line verbosity. Output goes to stderr so stdout stays free for
/// listings and plans.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(STEPWISE_LOG_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(default_directive(verbosity)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Create a span for the whole resolved pipeline of one task
pub fn pipeline_span(task: &str, total_steps: usize) -> Span {
    span!(Level::INFO, "pipeline", task = %task, total_steps = %total_steps)
}

/// Create a span for a single leaf step
pub fn task_span(step: &str, position: usize) -> Span {
    span!(Level::INFO, "task", step = %step, position = %position)
}

/// Emit a structured event for step completion
pub fn task_completed(step: &str, duration_ms: u64, success: bool) {
    if success {
        info!(step = %step, duration_ms = %duration_ms, "task_completed");
    } else {
        error!(step = %step, duration_ms = %duration_ms, "task_failed");
    }
}
