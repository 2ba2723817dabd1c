use crate::commands::Commands;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use stepwise_config::ConfigLoader;
use stepwise_core::{BrowserList, Result, STEPWISE_CONFIG_VAR};
use stepwise_task::{ExecutionContext, Orchestrator};

#[derive(Debug, Parser)]
#[command(name = "stepwise")]
#[command(about = "Run named task pipelines from a JSON build file", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Build file to load instead of ./stepwise.json
    #[arg(long, global = true, env = STEPWISE_CONFIG_VAR, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Comma-separated browsers handed to test runners
    #[arg(long, global = true, value_name = "LIST")]
    pub browsers: Option<String>,

    /// Resolve and report steps without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Task to run when no subcommand is given
    pub task: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn browsers(&self) -> BrowserList {
        BrowserList::parse(self.browsers.as_deref())
    }

    /// The subcommand to execute; a bare task name means `run`
    pub fn into_command(self) -> Commands {
        match self.command {
            Some(command) => command,
            None => Commands::Run { task: self.task },
        }
    }

    /// Load the build file and assemble an orchestrator with the built-in plugins
    pub fn orchestrator(&self) -> Result<Orchestrator> {
        let mut loader = ConfigLoader::new();
        if let Some(config) = &self.config {
            loader = loader.file(config);
        }
        let config = loader.load()?;

        let context = ExecutionContext::new(config, self.browsers()).with_dry_run(self.dry_run);
        let plugins = stepwise_plugins::builtin_registry()?;
        Orchestrator::from_config(context, plugins)
    }
}
