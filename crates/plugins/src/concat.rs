use crate::{mismatched_options, write_output};
use async_trait::async_trait;
use stepwise_config::TargetConfig;
use stepwise_core::{Error, Result};
use stepwise_task::{Invocation, Plugin};
use stepwise_utils::expand_patterns;

const NAME: &str = "concat";
const DEFAULT_SEPARATOR: &str = "\n";

/// Joins matched files into a single output file
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatPlugin;

#[async_trait]
impl Plugin for ConcatPlugin {
    fn name(&self) -> &str {
        NAME
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::Concat(config) = invocation.require_options()? else {
            return Err(mismatched_options(NAME, invocation.step));
        };

        let files = expand_patterns(invocation.context.project_root(), &config.src)?;
        if files.is_empty() {
            return Err(Error::plugin(
                NAME,
                format!("no source files matched for '{}'", invocation.step),
            ));
        }

        let mut parts = Vec::with_capacity(files.len());
        for file in &files {
            let content = tokio::fs::read_to_string(&file.path)
                .await
                .map_err(|e| Error::file_system(&file.path, "read", e))?;
            parts.push(content);
        }

        let separator = config.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
        let dest = invocation.resolve(&config.dest);
        write_output(&dest, &parts.join(separator)).await?;

        tracing::info!(dest = %dest.display(), files = files.len(), "Concatenated");
        Ok(())
    }
}
