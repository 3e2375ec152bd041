//! heatload - Main Entry Point

use clap::Parser;
use heatload::cli::{cmd_info, cmd_run, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heatload=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            seed,
            train_fraction,
            cv_folds,
            output,
        } => {
            cmd_run(&data, seed, train_fraction, cv_folds, output.as_ref())?;
        }
        Commands::Info { data } => {
            cmd_info(&data)?;
        }
    }

    Ok(())
}
