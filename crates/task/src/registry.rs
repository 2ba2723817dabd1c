//! Registry of composite tasks

use crate::definition::TaskDefinition;
use indexmap::IndexMap;
use stepwise_core::{Error, Result};

/// Composite tasks keyed by name, in registration order
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: IndexMap<String, TaskDefinition>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `definition`, refusing names that are already taken.
    ///
    /// The existing definition is left untouched on failure.
    pub fn register(&mut self, definition: TaskDefinition) -> Result<()> {
        if self.tasks.contains_key(&definition.name) {
            return Err(Error::duplicate_task(definition.name));
        }
        self.tasks.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TaskDefinition> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_keeps_original() {
        let mut registry = TaskRegistry::new();
        registry
            .register(TaskDefinition::new("build", ["clean", "compile"]))
            .unwrap();

        let err = registry
            .register(TaskDefinition::new("build", ["other"]))
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateTask { ref name } if name == "build"));
        assert_eq!(registry.get("build").unwrap().steps, vec!["clean", "compile"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_follows_registration_order() {
        let mut registry = TaskRegistry::new();
        for name in ["transpile", "check", "dist"] {
            registry.register(TaskDefinition::new(name, ["x"])).unwrap();
        }
        let names: Vec<_> = registry.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["transpile", "check", "dist"]);
    }
}
