//! Turns the raw build file into typed sections

use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use stepwise_core::{Error, Result, ResultExt, OPTIONS_KEY, PLUGIN_KEY};

use super::types::{RawBuildFile, TargetConfig, TargetSection};
use super::validation::{validate_kind_name, validate_plugin_name, validate_steps, validate_task_name};

/// Fully validated contents of a build file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub targets: IndexMap<String, TargetSection>,
    pub tasks: IndexMap<String, Vec<String>>,
}

/// Parse and validate build file `content`; `source` only labels errors
pub fn parse_build_file(content: &str, source: &Path) -> Result<ParseResult> {
    let raw: RawBuildFile = serde_json::from_str(content)
        .with_context(|| format!("failed to parse '{}'", source.display()))?;
    process_raw(raw)
}

pub(crate) fn process_raw(raw: RawBuildFile) -> Result<ParseResult> {
    let mut targets = IndexMap::with_capacity(raw.targets.len());
    for (kind, entries) in raw.targets {
        let section = process_section(&kind, entries)?;
        targets.insert(kind, section);
    }

    let mut tasks = IndexMap::with_capacity(raw.tasks.len());
    for (name, steps) in raw.tasks {
        validate_task_name(&name)?;
        validate_steps(&name, &steps)?;
        if tasks.contains_key(&name) {
            return Err(Error::duplicate_task(name));
        }
        tasks.insert(name, steps);
    }

    Ok(ParseResult { targets, tasks })
}

fn process_section(kind: &str, mut entries: IndexMap<String, Value>) -> Result<TargetSection> {
    validate_kind_name(kind)?;

    let plugin = match entries.shift_remove(PLUGIN_KEY) {
        Some(Value::String(plugin)) => plugin,
        Some(other) => {
            return Err(Error::configuration(format!(
                "target-kind '{kind}': '{PLUGIN_KEY}' must be a string, got {other}"
            )))
        }
        None => kind.to_string(),
    };
    validate_plugin_name(kind, &plugin)?;

    let defaults = match entries.shift_remove(OPTIONS_KEY) {
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            return Err(Error::configuration(format!(
                "target-kind '{kind}': '{OPTIONS_KEY}' must be an object, got {other}"
            )))
        }
        None => None,
    };

    let mut targets = IndexMap::with_capacity(entries.len());
    for (target, value) in entries {
        let merged = merge_defaults(defaults.as_ref(), value);
        let config = TargetConfig::from_value(&plugin, merged)
            .ok_or_else(|| {
                Error::configuration(format!("plugin '{plugin}' has no option record"))
            })?
            .with_context(|| format!("invalid options for '{kind}:{target}'"))?;
        targets.insert(target, config);
    }

    Ok(TargetSection {
        kind: kind.to_string(),
        plugin,
        targets,
    })
}

/// Shallow-merge section defaults under a sub-target's own keys
fn merge_defaults(defaults: Option<&serde_json::Map<String, Value>>, value: Value) -> Value {
    match (defaults, value) {
        (Some(defaults), Value::Object(own)) => {
            let mut merged = defaults.clone();
            for (key, value) in own {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (_, value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::ExecConfig;
    use serde_json::json;

    fn parse(value: Value) -> Result<ParseResult> {
        parse_build_file(&value.to_string(), Path::new("stepwise.json"))
    }

    #[test]
    fn test_section_defaults_are_merged() {
        let result = parse(json!({
            "targets": {
                "karma": {
                    "plugin": "exec",
                    "options": { "command": "karma", "args": ["start"] },
                    "once": { "args": ["start", "--single-run"] },
                    "plain": {}
                }
            }
        }))
        .unwrap();

        let section = &result.targets["karma"];
        assert_eq!(section.plugin, "exec");
        assert_eq!(section.target_names().collect::<Vec<_>>(), ["once", "plain"]);

        let TargetConfig::Exec(ExecConfig { command, args, .. }) = section.get("once").unwrap()
        else {
            panic!("expected exec config");
        };
        assert_eq!(command, "karma");
        assert_eq!(args, &["start", "--single-run"]);

        let TargetConfig::Exec(plain) = section.get("plain").unwrap() else {
            panic!("expected exec config");
        };
        assert_eq!(plain.args, vec!["start"]);
    }

    #[test]
    fn test_plugin_defaults_to_kind_name() {
        let result = parse(json!({ "targets": { "clean": { "all": ["tmp"] } } })).unwrap();
        assert_eq!(result.targets["clean"].plugin, "clean");
    }

    #[test]
    fn test_unknown_plugin_is_rejected_at_load() {
        let err = parse(json!({ "targets": { "karma": { "once": {} } } })).unwrap_err();
        assert!(err.to_string().contains("unknown plugin 'karma'"));
    }

    #[test]
    fn test_malformed_record_names_kind_and_target() {
        let err = parse(json!({ "targets": { "concat": { "axiom": { "src": "not-a-list" } } } }))
            .unwrap_err();
        assert!(err.to_string().contains("'concat:axiom'"));
    }

    #[test]
    fn test_task_order_is_preserved() {
        let result = parse(json!({
            "tasks": { "z": ["clean"], "a": ["z"], "m": [] }
        }))
        .unwrap();
        assert_eq!(result.tasks.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    }

    #[test]
    fn test_repeated_task_name_is_a_duplicate() {
        let err = parse_build_file(
            r#"{ "tasks": { "build": ["clean"], "build": ["copy"] } }"#,
            Path::new("stepwise.json"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateTask { ref name } if name == "build"));
    }

    #[test]
    fn test_task_names_cannot_contain_separator() {
        assert!(parse(json!({ "tasks": { "a:b": ["clean"] } })).is_err());
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        assert!(parse(json!({ "targetz": {} })).is_err());
    }
}
