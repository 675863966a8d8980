//! radgate command-line interface
//!
//! Runs the RADIUS authentication gateway and offers small operator tools
//! for checking a configuration and probing a running gateway.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::probe::ProbeArgs;

#[derive(Parser)]
#[command(name = "radgate")]
#[command(about = "radgate - RADIUS authentication gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "config.ini")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve Access-Requests until interrupted (default)
    Serve,

    /// Validate the configuration and print what it resolves to
    Check,

    /// Send one Access-Request to a running gateway
    Probe(ProbeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::run(&cli.config).await?,
        Commands::Check => commands::check::run(&cli.config).await?,
        Commands::Probe(args) => commands::probe::run(args, &cli.config).await?,
    }

    Ok(())
}
