//! Plugin capability interface
//!
//! Every leaf step is carried out by a [`Plugin`]. Plugins are registered
//! explicitly in a [`PluginRegistry`] at startup and looked up by name when
//! a plan is resolved.

use crate::definition::RunReport;
use crate::orchestrator::ExecutionContext;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;
use stepwise_config::TargetConfig;
use stepwise_core::{Error, Result, StepRef};

/// Runs further steps from inside a plugin (used by `watch`)
///
/// `chain` is the invoking step's [`Invocation::chain`]. A nested step that
/// already appears in it is a [`Error::CircularDependency`].
#[async_trait]
pub trait NestedRunner: Send + Sync {
    /// Resolve `steps` without running them
    fn check_steps(&self, chain: &[String], steps: &[String]) -> Result<()>;

    /// Resolve and run `steps` in order as a task named after the last
    /// entry of `chain`
    async fn run_steps(&self, chain: &[String], steps: &[String]) -> Result<RunReport>;
}

/// Everything a plugin receives for one leaf invocation
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    pub step: &'a StepRef,
    /// Typed options of the sub-target, `None` for bare plugin steps
    pub options: Option<&'a TargetConfig>,
    pub context: &'a ExecutionContext,
    pub runner: &'a dyn NestedRunner,
    /// Composite tasks and nesting steps around this one, outermost first,
    /// ending with this step
    pub chain: &'a [String],
}

impl<'a> Invocation<'a> {
    /// The options record, or an error naming the step when there is none
    pub fn require_options(&self) -> Result<&'a TargetConfig> {
        self.options.ok_or_else(|| {
            Error::configuration(format!("step '{}' requires a configured target", self.step))
        })
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.context.resolve(path)
    }
}

/// A unit of work that a leaf step delegates to
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Name used to register and look up the plugin
    fn name(&self) -> &str;

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()>;
}

/// Statically populated mapping from plugin name to handler
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: impl Plugin + 'static) -> Result<()> {
        self.register_arc(Arc::new(plugin))
    }

    pub fn register_arc(&mut self, plugin: Arc<dyn Plugin>) -> Result<()> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(Error::configuration(format!(
                "plugin '{name}' is registered twice"
            )));
        }
        tracing::debug!(plugin = %name, "Registered plugin");
        self.plugins.insert(name, plugin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop(&'static str);

    #[async_trait]
    impl Plugin for Noop {
        fn name(&self) -> &str {
            self.0
        }

        async fn invoke(&self, _invocation: Invocation<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PluginRegistry::new();
        registry.register(Noop("clean")).unwrap();
        registry.register(Noop("copy")).unwrap();

        assert!(registry.contains("clean"));
        assert!(registry.get("copy").is_some());
        assert!(registry.get("concat").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["clean", "copy"]);
    }

    #[test]
    fn test_double_registration_is_rejected() {
        let mut registry = PluginRegistry::new();
        registry.register(Noop("clean")).unwrap();
        assert!(registry.register(Noop("clean")).is_err());
    }
}
