//! Ballast CLI - Command-line interface for portfolio risk diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a portfolio payload
//! ballast analyze portfolio.json --profile Moderate
//!
//! # Same, as JSON, and keep a dated copy under output/
//! ballast --format json analyze portfolio.json --output-dir output
//!
//! # List the scenarios a config would run
//! ballast scenarios --config ballast.toml
//!
//! # Print the effective configuration
//! ballast config
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "ballast=debug,ballast_portfolio=debug"
    } else if cli.quiet {
        "ballast=error,ballast_portfolio=error"
    } else {
        "ballast=info,ballast_portfolio=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let format = cli.format;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format, cli.quiet)?,
        Commands::Scenarios(args) => commands::scenarios::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
