//! Name validation for build file entries

use stepwise_core::errors::{Error, Result};
use stepwise_core::{StepRef, TARGET_SEPARATOR};

use super::types::TargetConfig;

/// Validates a target-kind section key
pub fn validate_kind_name(kind: &str) -> Result<()> {
    if kind.trim().is_empty() {
        return Err(Error::configuration("target-kind name cannot be empty"));
    }
    if kind.contains(TARGET_SEPARATOR) {
        return Err(Error::configuration(format!(
            "target-kind '{kind}' must not contain '{TARGET_SEPARATOR}'"
        )));
    }
    Ok(())
}

/// Validates a composite task name
pub fn validate_task_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::configuration("task name cannot be empty"));
    }
    if name.contains(TARGET_SEPARATOR) {
        return Err(Error::configuration(format!(
            "task '{name}' must not contain '{TARGET_SEPARATOR}', which separates a kind from its target"
        )));
    }
    Ok(())
}

/// Validates every step name of a composite task
pub fn validate_steps(task: &str, steps: &[String]) -> Result<()> {
    for step in steps {
        StepRef::parse(step).map_err(|e| {
            Error::configuration(format!("task '{task}' has an invalid step: {e}"))
        })?;
    }
    Ok(())
}

/// Validates that a section's plugin has a typed record
pub fn validate_plugin_name(kind: &str, plugin: &str) -> Result<()> {
    if TargetConfig::PLUGINS.contains(&plugin) {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "target-kind '{kind}' uses unknown plugin '{plugin}' (known plugins: {})",
            TargetConfig::PLUGINS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_kind_name() {
        assert!(validate_kind_name("").is_err());
        assert!(validate_kind_name("copy:x").is_err());
        assert!(validate_kind_name("closure-compiler").is_ok());
    }

    #[test]
    fn test_validate_task_name() {
        assert!(validate_task_name(" ").is_err());
        assert!(validate_task_name("check:watch").is_err());
        assert!(validate_task_name("check-watch").is_ok());
    }

    #[test]
    fn test_validate_steps() {
        assert!(validate_steps("t", &["clean".into(), "copy:a".into()]).is_ok());
        assert!(validate_steps("t", &["copy:".into()]).is_err());
    }

    #[test]
    fn test_validate_plugin_name() {
        assert!(validate_plugin_name("karma", "exec").is_ok());
        assert!(validate_plugin_name("karma", "karma").is_err());
    }
}
