//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create a duplicate task error
    #[must_use]
    pub fn duplicate_task(name: impl Into<String>) -> Self {
        Error::DuplicateTask { name: name.into() }
    }

    /// Create an unknown task error for a name requested directly
    #[must_use]
    pub fn unknown_task(name: impl Into<String>) -> Self {
        Error::UnknownTask {
            name: name.into(),
            referenced_by: None,
        }
    }

    /// Create an unknown task error for a step referenced by a composite task
    #[must_use]
    pub fn unknown_step(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Error::UnknownTask {
            name: name.into(),
            referenced_by: Some(referenced_by.into()),
        }
    }

    /// Create a circular dependency error from the offending chain
    #[must_use]
    pub fn circular_dependency(chain: Vec<String>) -> Self {
        Error::CircularDependency { chain }
    }

    /// Wrap a leaf failure with the task and step that produced it
    #[must_use]
    pub fn task_execution(
        task: impl Into<String>,
        step: impl Into<String>,
        position: usize,
        source: Error,
    ) -> Self {
        Error::TaskExecution {
            task: task.into(),
            step: step.into(),
            position,
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error caused by `source`
    #[must_use]
    pub fn configuration_caused_by(message: impl Into<String>, source: Error) -> Self {
        Error::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a glob pattern error
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, source: globset::Error) -> Self {
        Error::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }

    /// Create a plugin error
    #[must_use]
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Plugin {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// The innermost error behind any number of `TaskExecution` wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::TaskExecution { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
