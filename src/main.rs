//! Autoomics - Main Entry Point
//!
//! CLI for validating omics AutoML job configurations.

use autoomics::cli::{cmd_registries, cmd_validate, Cli, Commands};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoomics=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config, output } => {
            cmd_validate(&config, output.as_deref())?;
        }
        Commands::Registries => {
            cmd_registries();
        }
    }

    Ok(())
}
