//! Type definitions for build file parsing
//!
//! `raw` mirrors the JSON document; `targets` holds the typed per-plugin
//! records produced from it.

mod raw;
mod targets;

pub(crate) use raw::RawBuildFile;
pub use targets::{
    CleanConfig, ConcatConfig, CopyConfig, DirModuleConfig, ExecConfig, FileMapping,
    HtmlIndexConfig, MainModuleConfig, TargetConfig, WatchConfig, WatchOptions,
};

use indexmap::IndexMap;

/// A target-kind section after typing
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSection {
    /// Section key in the build file
    pub kind: String,
    /// Plugin that handles every sub-target of this section
    pub plugin: String,
    /// Sub-targets in declaration order
    pub targets: IndexMap<String, TargetConfig>,
}

impl TargetSection {
    pub fn get(&self, target: &str) -> Option<&TargetConfig> {
        self.targets.get(target)
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}
