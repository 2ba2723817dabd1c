//! Re-run steps whenever watched files change
//!
//! The watcher covers the whole project root and filters change events
//! through the configured patterns. Events are debounced; events raised
//! while the steps run are discarded so generated files do not retrigger
//! the loop. A failing re-run is logged and watching continues.

use crate::mismatched_options;
use async_trait::async_trait;
use notify::{Event, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use stepwise_config::{TargetConfig, WatchConfig};
use stepwise_core::{Error, Result};
use stepwise_task::{Invocation, Plugin};
use stepwise_utils::{to_slash, PatternFilter};
use tokio::sync::{mpsc, Notify};

const NAME: &str = "watch";

#[derive(Debug, Clone, Default)]
pub struct WatchPlugin {
    shutdown: Option<Arc<Notify>>,
}

impl WatchPlugin {
    /// Watch until Ctrl-C
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch until `shutdown` is notified instead of waiting for Ctrl-C
    pub fn with_shutdown(shutdown: Arc<Notify>) -> Self {
        Self {
            shutdown: Some(shutdown),
        }
    }

    async fn stopped(&self) {
        match &self.shutdown {
            Some(shutdown) => shutdown.notified().await,
            None => {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "Could not listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            }
        }
    }
}

#[async_trait]
impl Plugin for WatchPlugin {
    fn name(&self) -> &str {
        NAME
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::Watch(config) = invocation.require_options()? else {
            return Err(mismatched_options(NAME, invocation.step));
        };

        let filter = PatternFilter::new(&config.files)?;
        let root = invocation.context.project_root();
        let root = tokio::fs::canonicalize(root)
            .await
            .unwrap_or_else(|_| root.to_path_buf());
        let label = invocation.step.to_string();
        invocation
            .runner
            .check_steps(invocation.chain, &config.tasks)?;

        let stopped = self.stopped();
        tokio::pin!(stopped);

        if config.options.at_begin {
            tokio::select! {
                _ = &mut stopped => return Ok(()),
                _ = rerun(&invocation, &label, config) => {}
            }
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
            Err(e) => tracing::warn!(error = %e, "File watcher error"),
        })
        .map_err(|e| Error::plugin(NAME, format!("failed to start file watcher: {e}")))?;
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| Error::plugin(NAME, format!("failed to watch {}: {e}", root.display())))?;

        tracing::info!(step = %label, root = %root.display(), "Waiting for changes");
        let debounce = Duration::from_millis(config.options.debounce_ms);

        loop {
            tokio::select! {
                _ = &mut stopped => break,
                changed = rx.recv() => {
                    let Some(path) = changed else { break };
                    let Some(relative) = relevant(&root, &filter, &path) else { continue };
                    tracing::info!(file = %relative, "Change detected");

                    settle(&mut rx, debounce).await;
                    tokio::select! {
                        _ = &mut stopped => break,
                        _ = rerun(&invocation, &label, config) => {}
                    }
                    while rx.try_recv().is_ok() {}
                }
            }
        }

        tracing::info!(step = %label, "Stopped watching");
        Ok(())
    }
}

async fn rerun(invocation: &Invocation<'_>, label: &str, config: &WatchConfig) {
    match invocation
        .runner
        .run_steps(invocation.chain, &config.tasks)
        .await
    {
        Ok(report) => tracing::info!(
            step = %label,
            steps = report.steps.len(),
            "Watched steps completed"
        ),
        Err(e) => tracing::error!(step = %label, error = %e, "Watched steps failed"),
    }
}

/// Swallow further events until `quiet` passes without one
async fn settle(rx: &mut mpsc::UnboundedReceiver<PathBuf>, quiet: Duration) {
    loop {
        match tokio::time::timeout(quiet, rx.recv()).await {
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => return,
        }
    }
}

/// The project-relative path of `path` when the filter accepts it
fn relevant(root: &Path, filter: &PatternFilter, path: &Path) -> Option<String> {
    let relative = to_slash(path.strip_prefix(root).ok()?);
    filter.is_match(&relative).then_some(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_filters_by_pattern() {
        let filter = PatternFilter::new(&["lib/**/*.js", "!lib/**/*.gen.js"]).unwrap();
        let root = Path::new("/project");

        assert_eq!(
            relevant(root, &filter, Path::new("/project/lib/a/b.js")).as_deref(),
            Some("lib/a/b.js")
        );
        assert!(relevant(root, &filter, Path::new("/project/lib/a.gen.js")).is_none());
        assert!(relevant(root, &filter, Path::new("/project/tmp/a.js")).is_none());
        assert!(relevant(root, &filter, Path::new("/elsewhere/lib/a.js")).is_none());
    }

    #[tokio::test]
    async fn test_settle_returns_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(PathBuf::from("a")).unwrap();
        tx.send(PathBuf::from("b")).unwrap();

        settle(&mut rx, Duration::from_millis(10)).await;

        assert!(rx.try_recv().is_err());
    }
}
