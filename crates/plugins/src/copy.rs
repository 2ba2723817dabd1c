use crate::mismatched_options;
use async_trait::async_trait;
use stepwise_config::{FileMapping, TargetConfig};
use stepwise_core::{Error, Result};
use stepwise_task::{Invocation, Plugin};
use stepwise_utils::{ensure_parent, expand_patterns, resolve};

/// Copies files matched by pattern lists into destination directories
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyPlugin;

const NAME: &str = "copy";

#[async_trait]
impl Plugin for CopyPlugin {
    fn name(&self) -> &str {
        NAME
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::Copy(config) = invocation.require_options()? else {
            return Err(mismatched_options(NAME, invocation.step));
        };

        let mut copied = 0usize;
        for mapping in &config.files {
            copied += copy_mapping(&invocation, mapping).await?;
        }

        tracing::info!(step = %invocation.step, files = copied, "Copied files");
        Ok(())
    }
}

async fn copy_mapping(invocation: &Invocation<'_>, mapping: &FileMapping) -> Result<usize> {
    let base = invocation.resolve(mapping.cwd.as_deref().unwrap_or("."));
    let dest = invocation.resolve(&mapping.dest);
    let files = expand_patterns(&base, &mapping.src)?;

    for file in &files {
        let target = if mapping.expand {
            resolve(&dest, &file.relative)
        } else {
            match file.path.file_name() {
                Some(name) => dest.join(name),
                None => continue,
            }
        };

        ensure_parent(&target)?;
        tokio::fs::copy(&file.path, &target)
            .await
            .map_err(|e| Error::file_system(&file.path, "copy", e))?;
        tracing::debug!(from = %file.path.display(), to = %target.display(), "Copied");
    }

    Ok(files.len())
}
