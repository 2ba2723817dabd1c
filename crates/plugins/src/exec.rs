use crate::mismatched_options;
use async_trait::async_trait;
use stepwise_config::TargetConfig;
use stepwise_core::{Error, Result, BROWSERS_PLACEHOLDER, ROOT_PLACEHOLDER};
use stepwise_task::{Invocation, Plugin};
use tokio::process::Command;

const NAME: &str = "exec";

/// Spawns an external command and waits for it to exit
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecPlugin;

#[async_trait]
impl Plugin for ExecPlugin {
    fn name(&self) -> &str {
        NAME
    }

    async fn invoke(&self, invocation: Invocation<'_>) -> Result<()> {
        let TargetConfig::Exec(config) = invocation.require_options()? else {
            return Err(mismatched_options(NAME, invocation.step));
        };

        let placeholders = Placeholders::new(&invocation);
        let args: Vec<String> = config.args.iter().map(|a| placeholders.expand(a)).collect();
        let cwd = invocation.resolve(config.cwd.as_deref().unwrap_or("."));

        let mut command = Command::new(&config.command);
        command.args(&args).current_dir(&cwd).kill_on_drop(true);
        for (key, value) in &config.env {
            command.env(key, placeholders.expand(value));
        }

        tracing::info!(command = %config.command, args = ?args, cwd = %cwd.display(), "Spawning");
        let status = command.status().await.map_err(|e| {
            Error::command_execution(
                &config.command,
                args.clone(),
                format!("failed to spawn command: {e}"),
                None,
            )
        })?;

        if !status.success() {
            return Err(Error::command_execution(
                &config.command,
                args,
                format!("command exited with {status}"),
                status.code(),
            ));
        }

        Ok(())
    }
}

struct Placeholders {
    browsers: String,
    root: String,
}

impl Placeholders {
    fn new(invocation: &Invocation<'_>) -> Self {
        Self {
            browsers: invocation.context.browsers.joined(),
            root: invocation.context.project_root().display().to_string(),
        }
    }

    fn expand(&self, value: &str) -> String {
        value
            .replace(BROWSERS_PLACEHOLDER, &self.browsers)
            .replace(ROOT_PLACEHOLDER, &self.root)
    }
}
