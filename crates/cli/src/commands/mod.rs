use clap::Subcommand;
use stepwise_core::{Result, DEFAULT_TASK_NAME};
use stepwise_task::Orchestrator;

pub mod list;
pub mod plan;
pub mod run;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run a task (defaults to "default")
    Run {
        /// Composite task, target-kind or kind:target to run
        task: Option<String>,
    },

    /// List composite tasks and configured targets
    #[command(visible_alias = "ls")]
    List,

    /// Print the flattened step order of a task without running it
    Plan {
        /// Task to resolve
        task: String,
    },
}

impl Commands {
    pub async fn execute(self, orchestrator: &Orchestrator) -> Result<()> {
        match self {
            Commands::Run { task } => {
                let task = task.as_deref().unwrap_or(DEFAULT_TASK_NAME);
                run::execute(orchestrator, task).await
            }
            Commands::List => {
                list::execute(orchestrator);
                Ok(())
            }
            Commands::Plan { task } => plan::execute(orchestrator, &task),
        }
    }
}
