/// Constants used throughout the stepwise codebase
// Build file
pub const BUILD_FILE_NAME: &str = "stepwise.json";

// Environment variable names
pub const STEPWISE_CONFIG_VAR: &str = "STEPWISE_CONFIG";
pub const STEPWISE_LOG_VAR: &str = "STEPWISE_LOG";

// Task run when none is named on the command line
pub const DEFAULT_TASK_NAME: &str = "default";

// Browser list used when `--browsers` is absent or blank
pub const DEFAULT_BROWSERS: &[&str] = &["PhantomJS"];

// Separator between a target-kind and a sub-target in a step name
pub const TARGET_SEPARATOR: char = ':';

// Reserved keys inside a target-kind section
pub const PLUGIN_KEY: &str = "plugin";
pub const OPTIONS_KEY: &str = "options";

// Placeholders expanded by command-running plugins
pub const BROWSERS_PLACEHOLDER: &str = "{browsers}";
pub const ROOT_PLACEHOLDER: &str = "{root}";
