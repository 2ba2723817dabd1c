use crate::{mismatched_options, write_output};
use async_trait::async_trait;
use std::path::Path;
use stepwise_config::{HtmlIndexConfig, TargetConfig};
use stepwise_core::Result;
use stepwise_task::{Invocation, Plugin};
use stepwise_utils::{expand_patterns, is_glob, matcher};

const NAME: &str = "make_html_index";

/// Writes an HTML page referencing matched scripts and stylesheets
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlIndexPlugin;

#[async_trait]
impl Plugin for HtmlIndexPlugin {
    fn name(&self) -> &str {
        NAME
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::MakeHtmlIndex(config) = invocation.require_options()? else {
            return Err(mismatched_options(NAME, invocation.step));
        };

        let base = invocation.resolve(config.cwd.as_deref().unwrap_or("."));
        let css = collect_refs(&base, &config.cssrefs)?;
        let scripts = collect_refs(&base, &config.scriptrefs)?;

        let dest = invocation.resolve(&config.dest);
        write_output(&dest, &render(config, &css, &scripts)).await?;

        tracing::info!(
            dest = %dest.display(),
            scripts = scripts.len(),
            stylesheets = css.len(),
            "Wrote HTML index"
        );
        Ok(())
    }
}

/// Resolve reference patterns to page-relative URLs.
///
/// Glob patterns contribute their matches, literal references are kept
/// whether or not the file exists yet, and `!` patterns drop earlier
/// entries. The first occurrence of a reference wins.
fn collect_refs(base: &Path, patterns: &[String]) -> Result<Vec<String>> {
    let mut refs: Vec<String> = Vec::new();

    for pattern in patterns {
        if let Some(negated) = pattern.strip_prefix('!') {
            let excluded = matcher(negated)?;
            refs.retain(|r| !excluded.is_match(r));
            continue;
        }

        let found = if is_glob(pattern) {
            expand_patterns(base, std::slice::from_ref(pattern))?
                .into_iter()
                .map(|file| file.relative)
                .collect()
        } else {
            vec![pattern.trim_start_matches("./").to_string()]
        };

        for reference in found {
            if !refs.contains(&reference) {
                refs.push(reference);
            }
        }
    }

    Ok(refs)
}

fn render(config: &HtmlIndexConfig, css: &[String], scripts: &[String]) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape_html(&config.title)));
    for href in css {
        page.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            escape_html(href)
        ));
    }
    for src in scripts {
        page.push_str(&format!("<script src=\"{}\"></script>\n", escape_html(src)));
    }
    page.push_str("</head>\n<body>\n</body>\n</html>\n");
    page
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
