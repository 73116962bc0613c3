//! Tramita - judicial-case monitoring bot.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tramita_cli::{check, runner::Runner, Cli, CliError, Command, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> tramita_cli::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Check => {
            if !check::run(&config, true).await? {
                return Err(CliError::CheckFailed);
            }
        }
        Command::Run(args) => {
            if !check::run(&config, !args.no_ai).await? {
                return Err(CliError::CheckFailed);
            }

            let runner = Runner::from_config(&config, !args.no_ai, args.dry_run)?;
            runner.sweep(args.tab.as_deref()).await?;
        }
    }

    Ok(())
}
