mod cli;
mod commands;
mod completions;
mod error;
mod output;
mod settings;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        error::handle_error(err);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    let config = settings::load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Trim(args) => commands::transcript::trim(&config, args, format),
        Commands::Fallback(args) => commands::transcript::fallback(&config, args, format),
        Commands::Govern(args) => commands::transcript::govern(&config, args, format),
        Commands::Policy(args) => commands::policy::run(&config, args, format),
        Commands::Failover(args) => commands::failover::run(&config, args, format),
        Commands::Completions { .. } => Ok(()),
    }
}
