//! Loaded build configuration
//!
//! `Config` is built once at startup and never mutated afterwards. It is
//! `Clone + Send + Sync` and is shared through an `Arc`.

use crate::parser::{ParseResult, TargetConfig, TargetSection};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory all relative paths in the build file resolve against
    pub project_root: PathBuf,

    /// Build file the configuration came from, if any
    pub build_file: Option<PathBuf>,

    /// Parsed and typed build file contents
    pub parse_result: Arc<ParseResult>,
}

impl Config {
    pub fn new(
        project_root: PathBuf,
        build_file: Option<PathBuf>,
        parse_result: ParseResult,
    ) -> Self {
        Self {
            project_root,
            build_file,
            parse_result: Arc::new(parse_result),
        }
    }

    /// A configuration with no targets or tasks, rooted at `project_root`
    pub fn empty(project_root: impl Into<PathBuf>) -> Self {
        Self::new(project_root.into(), None, ParseResult::default())
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn sections(&self) -> &IndexMap<String, TargetSection> {
        &self.parse_result.targets
    }

    pub fn section(&self, kind: &str) -> Option<&TargetSection> {
        self.parse_result.targets.get(kind)
    }

    pub fn target(&self, kind: &str, target: &str) -> Option<&TargetConfig> {
        self.section(kind).and_then(|section| section.get(target))
    }

    /// Composite tasks in declaration order
    pub fn tasks(&self) -> &IndexMap<String, Vec<String>> {
        &self.parse_result.tasks
    }
}
