//! Build file parser
//!
//! Reads the JSON build file, applies per-section defaults and validates
//! every sub-target against the typed record of its plugin.

mod processing;
mod types;
mod validation;

pub use processing::{parse_build_file, ParseResult};
pub use types::{
    CleanConfig, ConcatConfig, CopyConfig, DirModuleConfig, ExecConfig, FileMapping,
    HtmlIndexConfig, MainModuleConfig, TargetConfig, TargetSection, WatchConfig, WatchOptions,
};
pub use validation::validate_task_name;
