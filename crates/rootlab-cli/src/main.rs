//! Rootlab CLI - fixed-point and Newton root finding from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Where does f change sign?
//! rootlab scan --problem cubic-sine --samples 1000
//!
//! # Where may fixed-point iteration start?
//! rootlab contraction --problem cubic-sine
//!
//! # Solve from a start value, printing every iteration
//! rootlab solve --method newton --x0 0.8 --trace
//!
//! # Compare both solvers from the same start
//! rootlab compare --problem cosine --x0 0.5
//!
//! # Scan, then compare both solvers at every candidate
//! rootlab survey --max-iterations 300
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?.with_overrides(&cli.overrides);
    let ctx = Context::from_settings(&settings, cli.format)?;

    // Execute command
    match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &ctx)?,
        Commands::Solve(args) => commands::solve::execute(args, &ctx)?,
        Commands::Compare(args) => commands::compare::execute(args, &ctx)?,
        Commands::Contraction(args) => commands::contraction::execute(args, &ctx)?,
        Commands::Survey(args) => commands::survey::execute(args, &ctx)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,rootlab_math=trace,rootlab=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
