//! Generated JavaScript entry modules
//!
//! `make_dir_module` writes an ES6 module that imports every matched file
//! and exports them as one object keyed by a shortened module id.
//! `make_main_module` writes a module that loads every matched file through
//! a loader function, in match order.

use crate::{mismatched_options, module_id, write_output};
use async_trait::async_trait;
use std::collections::HashSet;
use stepwise_config::{DirModuleConfig, MainModuleConfig, TargetConfig};
use stepwise_core::{Error, Result};
use stepwise_task::{Invocation, Plugin};
use stepwise_utils::{expand_patterns, strip_components, MatchedFile};

const DIR_MODULE: &str = "make_dir_module";
const MAIN_MODULE: &str = "make_main_module";
const HEADER: &str = "// Generated by stepwise. Do not edit.\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct DirModulePlugin;

#[async_trait]
impl Plugin for DirModulePlugin {
    fn name(&self) -> &str {
        DIR_MODULE
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::MakeDirModule(config) = invocation.require_options()? else {
            return Err(mismatched_options(DIR_MODULE, invocation.step));
        };

        let files = matched_modules(&invocation, config.cwd.as_deref(), &config.modules)?;
        let source = render_dir_module(config, &files)?;
        let dest = invocation.resolve(&config.dest);
        write_output(&dest, &source).await?;

        tracing::info!(dest = %dest.display(), modules = files.len(), "Wrote directory module");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MainModulePlugin;

#[async_trait]
impl Plugin for MainModulePlugin {
    fn name(&self) -> &str {
        MAIN_MODULE
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::MakeMainModule(config) = invocation.require_options()? else {
            return Err(mismatched_options(MAIN_MODULE, invocation.step));
        };

        let files = matched_modules(&invocation, config.cwd.as_deref(), &config.modules)?;
        let source = render_main_module(config, &files);
        let dest = invocation.resolve(&config.dest);
        write_output(&dest, &source).await?;

        tracing::info!(dest = %dest.display(), modules = files.len(), "Wrote main module");
        Ok(())
    }
}

fn matched_modules(
    invocation: &Invocation<'_>,
    cwd: Option<&str>,
    patterns: &[String],
) -> Result<Vec<MatchedFile>> {
    let base = invocation.resolve(cwd.unwrap_or("."));
    expand_patterns(&base, patterns)
}

fn render_dir_module(config: &DirModuleConfig, files: &[MatchedFile]) -> Result<String> {
    let mut imports = String::new();
    let mut entries = String::new();
    let mut keys = HashSet::new();

    for (index, file) in files.iter().enumerate() {
        let id = module_id(&file.relative);
        let key = strip_components(id, config.strip);
        if key.is_empty() {
            return Err(Error::plugin(
                DIR_MODULE,
                format!(
                    "stripping {} components from '{}' leaves an empty key",
                    config.strip, file.relative
                ),
            ));
        }
        if !keys.insert(key.clone()) {
            return Err(Error::plugin(
                DIR_MODULE,
                format!("more than one module maps to key '{key}'"),
            ));
        }

        imports.push_str(&format!("import * as m{index} from '{}';\n", escape_js(id)));
        entries.push_str(&format!("  '{}': m{index},\n", escape_js(&key)));
    }

    Ok(format!(
        "{HEADER}{imports}\nexport var dir = {{\n{entries}}};\n\nexport default dir;\n"
    ))
}

fn render_main_module(config: &MainModuleConfig, files: &[MatchedFile]) -> String {
    let mut source = String::from(HEADER);
    for file in files {
        source.push_str(&format!(
            "{}('{}');\n",
            config.require,
            escape_js(module_id(&file.relative))
        ));
    }
    source
}

/// Escape a value for a single-quoted JavaScript string literal
fn escape_js(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
