//! Folio CLI - Trade reconciliation and XIRR from the command line.
//!
//! # Usage
//!
//! ```bash
//! # XIRR of a single holding
//! folio xirr --trades trades.csv --symbol AAPL --price 190.25
//!
//! # Reconcile every position in a trades file
//! folio reconcile --trades trades.csv --prices prices.csv --as-of 2024-06-30
//!
//! # Machine-readable output with engine settings from a file
//! folio --format json --config folio.toml reconcile --trades trades.csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;
mod settings;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = settings::load(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Xirr(args) => commands::xirr::execute(args, &config, format, cli.quiet)?,
        Commands::Reconcile(args) => {
            commands::reconcile::execute(args, &config, format, cli.quiet)?;
        }
    }

    Ok(())
}
