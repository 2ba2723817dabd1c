//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for stepwise operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for stepwise operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task name was registered twice
    DuplicateTask { name: String },

    /// A step name could not be resolved to a composite task or a leaf
    UnknownTask {
        name: String,
        referenced_by: Option<String>,
    },

    /// Composite tasks reference each other in a loop
    CircularDependency { chain: Vec<String> },

    /// A leaf step failed while running `task`
    TaskExecution {
        task: String,
        step: String,
        position: usize,
        #[source]
        source: Box<Error>,
    },

    /// Build file or target configuration errors
    Configuration {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid glob pattern
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// External command execution errors
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },

    /// A plugin reported a failure of its own
    Plugin { plugin: String, message: String },
}
