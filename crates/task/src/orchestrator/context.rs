use std::path::{Path, PathBuf};
use std::sync::Arc;
use stepwise_config::Config;
use stepwise_core::BrowserList;

/// Read-only state shared by every step of a build invocation
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub config: Arc<Config>,
    pub browsers: BrowserList,
    /// Resolve and report steps without invoking plugins
    pub dry_run: bool,
}

impl ExecutionContext {
    pub fn new(config: Config, browsers: BrowserList) -> Self {
        Self {
            config: Arc::new(config),
            browsers,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn project_root(&self) -> &Path {
        self.config.project_root()
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        stepwise_utils::resolve(self.project_root(), path)
    }
}
