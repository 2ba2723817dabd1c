//! Typed option records, one per built-in plugin

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Options for one (target-kind, sub-target) pair, typed by plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "plugin", rename_all = "snake_case")]
pub enum TargetConfig {
    Clean(CleanConfig),
    Copy(CopyConfig),
    Concat(ConcatConfig),
    MakeDirModule(DirModuleConfig),
    MakeMainModule(MainModuleConfig),
    MakeHtmlIndex(HtmlIndexConfig),
    Exec(ExecConfig),
    Watch(WatchConfig),
}

impl TargetConfig {
    /// Plugin names with a typed record
    pub const PLUGINS: &'static [&'static str] = &[
        "clean",
        "copy",
        "concat",
        "make_dir_module",
        "make_main_module",
        "make_html_index",
        "exec",
        "watch",
    ];

    /// Parse `value` as the record for `plugin`.
    ///
    /// Returns `None` when the plugin has no typed record.
    pub fn from_value(
        plugin: &str,
        value: serde_json::Value,
    ) -> Option<Result<Self, serde_json::Error>> {
        let parsed = match plugin {
            "clean" => serde_json::from_value::<CleanInput>(value)
                .map(|input| TargetConfig::Clean(input.into())),
            "copy" => serde_json::from_value(value).map(TargetConfig::Copy),
            "concat" => serde_json::from_value(value).map(TargetConfig::Concat),
            "make_dir_module" => serde_json::from_value(value).map(TargetConfig::MakeDirModule),
            "make_main_module" => serde_json::from_value(value).map(TargetConfig::MakeMainModule),
            "make_html_index" => serde_json::from_value(value).map(TargetConfig::MakeHtmlIndex),
            "exec" => serde_json::from_value(value).map(TargetConfig::Exec),
            "watch" => serde_json::from_value(value).map(TargetConfig::Watch),
            _ => return None,
        };
        Some(parsed)
    }

    /// Name of the plugin this record belongs to
    pub fn plugin(&self) -> &'static str {
        match self {
            TargetConfig::Clean(_) => "clean",
            TargetConfig::Copy(_) => "copy",
            TargetConfig::Concat(_) => "concat",
            TargetConfig::MakeDirModule(_) => "make_dir_module",
            TargetConfig::MakeMainModule(_) => "make_main_module",
            TargetConfig::MakeHtmlIndex(_) => "make_html_index",
            TargetConfig::Exec(_) => "exec",
            TargetConfig::Watch(_) => "watch",
        }
    }
}

/// `clean` accepts either a bare list of paths or `{ "paths": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CleanInput {
    Paths(Vec<String>),
    Detailed(CleanConfig),
}

impl From<CleanInput> for CleanConfig {
    fn from(input: CleanInput) -> Self {
        match input {
            CleanInput::Paths(paths) => CleanConfig { paths },
            CleanInput::Detailed(config) => config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CleanConfig {
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    pub files: Vec<FileMapping>,
}

/// One source-to-destination mapping of a copy target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileMapping {
    /// Keep paths relative to `cwd` under `dest`; otherwise flatten
    #[serde(default = "default_true")]
    pub expand: bool,
    pub cwd: Option<String>,
    pub src: Vec<String>,
    pub dest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcatConfig {
    pub src: Vec<String>,
    pub dest: String,
    pub separator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirModuleConfig {
    pub cwd: Option<String>,
    pub modules: Vec<String>,
    pub dest: String,
    /// Leading path components dropped from each module key
    #[serde(default)]
    pub strip: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MainModuleConfig {
    pub cwd: Option<String>,
    pub modules: Vec<String>,
    pub dest: String,
    /// Loader function called for every module
    #[serde(default = "default_require")]
    pub require: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlIndexConfig {
    pub cwd: Option<String>,
    pub dest: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub scriptrefs: Vec<String>,
    #[serde(default)]
    pub cssrefs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub cwd: Option<String>,
    #[serde(default)]
    pub env: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    pub files: Vec<String>,
    pub tasks: Vec<String>,
    #[serde(default)]
    pub options: WatchOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct WatchOptions {
    /// Run the task list once before waiting for changes
    #[serde(default)]
    pub at_begin: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            at_begin: false,
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_require() -> String {
    "require".to_string()
}

fn default_debounce_ms() -> u64 {
    250
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_accepts_bare_list() {
        let config = TargetConfig::from_value("clean", json!(["tmp", "dist"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            config,
            TargetConfig::Clean(CleanConfig {
                paths: vec!["tmp".into(), "dist".into()]
            })
        );
    }

    #[test]
    fn test_copy_mapping_defaults_to_expand() {
        let config = TargetConfig::from_value(
            "copy",
            json!({ "files": [{ "cwd": "tmp/dist/", "src": ["**/*.js"], "dest": "out/js/" }] }),
        )
        .unwrap()
        .unwrap();

        let TargetConfig::Copy(copy) = config else {
            panic!("expected copy config");
        };
        assert!(copy.files[0].expand);
        assert_eq!(copy.files[0].cwd.as_deref(), Some("tmp/dist/"));
    }

    #[test]
    fn test_watch_options_use_camel_case() {
        let config = TargetConfig::from_value(
            "watch",
            json!({ "files": ["lib/**/*.js"], "tasks": ["check"], "options": { "atBegin": true } }),
        )
        .unwrap()
        .unwrap();

        let TargetConfig::Watch(watch) = config else {
            panic!("expected watch config");
        };
        assert!(watch.options.at_begin);
        assert_eq!(watch.options.debounce_ms, 250);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = TargetConfig::from_value("concat", json!({ "src": [], "dest": "x", "bogus": 1 }))
            .unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_plugin_has_no_record() {
        assert!(TargetConfig::from_value("karma", json!({})).is_none());
    }

    #[test]
    fn test_main_module_default_loader() {
        let config = TargetConfig::from_value(
            "make_main_module",
            json!({ "modules": ["**/*.test.js"], "dest": "tmp/test/test_main.js" }),
        )
        .unwrap()
        .unwrap();
        let TargetConfig::MakeMainModule(main) = config else {
            panic!("expected main module config");
        };
        assert_eq!(main.require, "require");
    }
}
