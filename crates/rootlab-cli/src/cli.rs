//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::commands::{CompareArgs, ContractionArgs, ScanArgs, SolveArgs, SurveyArgs};

/// Rootlab - fixed-point and Newton root finding from the command line
#[derive(Parser)]
#[command(name = "rootlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log solver iterations (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, env = "ROOTLAB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List sign changes of f as root candidates
    Scan(ScanArgs),

    /// Run one solver from a start value
    Solve(SolveArgs),

    /// Run both solvers and compare their convergence
    Compare(CompareArgs),

    /// List the regions where the fixed-point map contracts
    Contraction(ContractionArgs),

    /// Scan for candidates and compare both solvers at each one
    Survey(SurveyArgs),
}

/// Settings that can be given on the command line as well as in the config file.
///
/// Every field is optional; a missing flag leaves the configured value alone.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Problem to solve
    #[arg(short, long, value_enum, global = true)]
    pub problem: Option<ProblemKind>,

    /// Interval length L of the cubic-sine problem
    #[arg(long, global = true)]
    pub length: Option<f64>,

    /// Constant c of the quadratic problem x^2 - c
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub constant: Option<f64>,

    /// Lower bound of the scan window (defaults to the problem's domain)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lower: Option<f64>,

    /// Upper bound of the scan window (defaults to the problem's domain)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub upper: Option<f64>,

    /// Number of sample points for scans
    #[arg(long, global = true)]
    pub samples: Option<usize>,

    /// Step-size tolerance
    #[arg(long, global = true)]
    pub tolerance: Option<f64>,

    /// Iteration budget per solver run
    #[arg(long, global = true)]
    pub max_iterations: Option<u32>,
}

/// Built-in problems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    /// (8/3)(x/L) - 3(x/L)^2 + (1/3)(x/L)^3 - (2/3)sin(pi x/L) on [0, L]
    #[default]
    CubicSine,
    /// x - cos(x) on [0, 1]
    Cosine,
    /// x^2 - c
    Quadratic,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
