use clap::Parser;
use eyre::WrapErr;
use stepwise::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Err(e) = stepwise_utils::tracing::init(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
    }

    let orchestrator = cli
        .orchestrator()
        .wrap_err("failed to load build configuration")?;

    cli.into_command().execute(&orchestrator).await?;
    Ok(())
}
