//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateTask { name } => {
                write!(f, "task '{name}' is already registered")
            }
            Error::UnknownTask {
                name,
                referenced_by,
            } => match referenced_by {
                Some(parent) => {
                    write!(f, "task '{name}' (referenced by '{parent}') is not defined")
                }
                None => write!(f, "task '{name}' is not defined"),
            },
            Error::CircularDependency { chain } => {
                write!(f, "circular task reference: {}", chain.join(" -> "))
            }
            Error::TaskExecution {
                task,
                step,
                position,
                source,
            } => {
                write!(
                    f,
                    "task '{task}' failed at step {position} '{step}': {source}"
                )
            }
            Error::Configuration { message, source } => match source {
                Some(source) => write!(f, "configuration error: {message}: {source}"),
                None => write!(f, "configuration error: {message}"),
            },
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
            Error::Pattern { pattern, source } => {
                write!(f, "invalid glob pattern '{pattern}': {source}")
            }
            Error::CommandExecution {
                command,
                args,
                message,
                exit_code,
            } => {
                let args_str = args.join(" ");
                let invocation = if args_str.is_empty() {
                    command.clone()
                } else {
                    format!("{command} {args_str}")
                };
                match exit_code {
                    Some(code) => write!(
                        f,
                        "command '{invocation}' failed with exit code {code}: {message}"
                    ),
                    None => write!(f, "command '{invocation}' failed: {message}"),
                }
            }
            Error::Plugin { plugin, message } => {
                write!(f, "plugin '{plugin}' failed: {message}")
            }
        }
    }
}
