use crate::mismatched_options;
use async_trait::async_trait;
use std::path::Path;
use stepwise_config::TargetConfig;
use stepwise_core::{Error, Result};
use stepwise_task::{Invocation, Plugin};
use stepwise_utils::lexical_normalize;

/// Deletes generated files and directories
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanPlugin;

const NAME: &str = "clean";

#[async_trait]
impl Plugin for CleanPlugin {
    fn name(&self) -> &str {
        NAME
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::Clean(config) = invocation.require_options()? else {
            return Err(mismatched_options(NAME, invocation.step));
        };

        let root = lexical_normalize(invocation.context.project_root());
        for path in &config.paths {
            let target = lexical_normalize(&invocation.resolve(path));
            if target == root || !target.starts_with(&root) {
                return Err(Error::plugin(
                    NAME,
                    format!("refusing to delete '{path}' outside the project root"),
                ));
            }
            remove(&target).await?;
        }

        Ok(())
    }
}

async fn remove(path: &Path) -> Result<()> {
    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Nothing to clean");
            return Ok(());
        }
        Err(e) => return Err(Error::file_system(path, "inspect", e)),
    };

    let removed = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    removed.map_err(|e| Error::file_system(path, "remove", e))?;

    tracing::info!(path = %path.display(), "Removed");
    Ok(())
}
