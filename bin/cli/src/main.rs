use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::Commands;
use config::Config;

#[derive(Parser)]
#[command(name = "tinct")]
#[command(about = "Normalize, convert, generate and export CSS colors", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML file with default options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout is for results.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    cli.command.execute(&config)?;

    Ok(())
}
