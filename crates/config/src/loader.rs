//! Configuration loader for stepwise
//!
//! Locates the build file, parses it and produces the immutable `Config`
//! used for the rest of the process.

use crate::{config::Config, parser::parse_build_file, ParseResult};
use std::path::{Path, PathBuf};
use stepwise_core::{constants::BUILD_FILE_NAME, Error, Result};

/// Configuration loader that handles all startup configuration
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Directory to search (defaults to the current directory)
    directory: Option<PathBuf>,
    /// Explicit build file, relative to `directory` when not absolute
    file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to load configuration from
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    /// Use an explicit build file instead of discovering one
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<Config> {
        let working_dir = match self.directory {
            Some(dir) => dir,
            None => std::env::current_dir()
                .map_err(|e| Error::file_system(".", "get current directory", e))?,
        };

        match self.file {
            Some(file) => {
                let path = if file.is_absolute() {
                    file
                } else {
                    working_dir.join(file)
                };
                if !path.is_file() {
                    return Err(Error::configuration(format!(
                        "build file '{}' does not exist",
                        path.display()
                    )));
                }
                load_file(&path)
            }
            None => {
                let candidate = working_dir.join(BUILD_FILE_NAME);
                if candidate.is_file() {
                    load_file(&candidate)
                } else {
                    tracing::warn!(
                        directory = %working_dir.display(),
                        "No {BUILD_FILE_NAME} found, continuing with an empty configuration"
                    );
                    Ok(Config::new(working_dir, None, ParseResult::default()))
                }
            }
        }
    }
}

fn load_file(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).map_err(|e| Error::file_system(path, "read", e))?;
    let parse_result = parse_build_file(&content, path)?;

    let project_root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::debug!(
        build_file = %path.display(),
        sections = parse_result.targets.len(),
        tasks = parse_result.tasks.len(),
        "Loaded build file"
    );

    Ok(Config::new(project_root, Some(path.to_path_buf()), parse_result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discovers_build_file_in_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(BUILD_FILE_NAME),
            r#"{ "tasks": { "default": ["clean"] } }"#,
        )
        .unwrap();

        let config = ConfigLoader::new().directory(dir.path()).load().unwrap();

        assert_eq!(config.project_root(), dir.path());
        assert_eq!(config.build_file, Some(dir.path().join(BUILD_FILE_NAME)));
        assert!(config.tasks().contains_key("default"));
    }

    #[test]
    fn test_missing_build_file_gives_empty_config() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::new().directory(dir.path()).load().unwrap();
        assert!(config.build_file.is_none());
        assert!(config.tasks().is_empty());
    }

    #[test]
    fn test_explicit_file_sets_project_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("build");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("pipeline.json"), "{}").unwrap();

        let config = ConfigLoader::new()
            .directory(dir.path())
            .file("build/pipeline.json")
            .load()
            .unwrap();

        assert_eq!(config.project_root(), nested.as_path());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .directory(dir.path())
            .file("nope.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_invalid_json_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BUILD_FILE_NAME), "{ not json").unwrap();
        let err = ConfigLoader::new().directory(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
