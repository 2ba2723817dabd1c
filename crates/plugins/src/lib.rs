//! Built-in plugins for stepwise
//!
//! Each plugin handles one typed option record from the build file. The
//! registry returned by [`builtin_registry`] is what the command line uses;
//! embedders can extend it with their own plugins before handing it to the
//! orchestrator.

mod clean;
mod concat;
mod copy;
mod exec;
mod html_index;
mod modules;
mod watch;

pub use clean::CleanPlugin;
pub use concat::ConcatPlugin;
pub use copy::CopyPlugin;
pub use exec::ExecPlugin;
pub use html_index::HtmlIndexPlugin;
pub use modules::{DirModulePlugin, MainModulePlugin};
pub use watch::WatchPlugin;

use std::path::Path;
use stepwise_core::{Error, Result};
use stepwise_task::PluginRegistry;

/// Registry holding every built-in plugin
pub fn builtin_registry() -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::new();
    registry.register(CleanPlugin)?;
    registry.register(CopyPlugin)?;
    registry.register(ConcatPlugin)?;
    registry.register(DirModulePlugin)?;
    registry.register(MainModulePlugin)?;
    registry.register(HtmlIndexPlugin)?;
    registry.register(ExecPlugin)?;
    registry.register(WatchPlugin::new())?;
    Ok(registry)
}

/// Error for a record handed to the wrong plugin
pub(crate) fn mismatched_options(plugin: &str, step: &impl std::fmt::Display) -> Error {
    Error::plugin(plugin, format!("step '{step}' does not carry {plugin} options"))
}

/// Write `contents` to `path`, creating parent directories
pub(crate) async fn write_output(path: &Path, contents: &str) -> Result<()> {
    stepwise_utils::ensure_parent(path)?;
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::file_system(path, "write", e))
}

/// Module id of a `/`-separated path: the path without its `.js` suffix
pub(crate) fn module_id(relative: &str) -> &str {
    relative.strip_suffix(".js").unwrap_or(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_has_every_typed_plugin() {
        let registry = builtin_registry().unwrap();
        for name in stepwise_config::TargetConfig::PLUGINS {
            assert!(registry.contains(name), "missing plugin {name}");
        }
    }

    #[test]
    fn test_module_id() {
        assert_eq!(module_id("wash/exe/cat.js"), "wash/exe/cat");
        assert_eq!(module_id("readme"), "readme");
    }
}
