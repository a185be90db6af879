//! Scan command implementation.
//!
//! Lists the sign changes of f over the scan window.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{display_sci, display_value, print_header, print_output, print_warning};

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {}

/// One root candidate.
#[derive(Debug, Serialize, Tabled)]
pub struct CandidateRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Location", display_with = "display_value")]
    pub location: f64,
    #[tabled(rename = "Lower", display_with = "display_value")]
    pub lower: f64,
    #[tabled(rename = "Upper", display_with = "display_value")]
    pub upper: f64,
    #[tabled(rename = "f(location)", display_with = "display_sci")]
    pub residual: f64,
}

/// Execute the scan command.
pub fn execute(_args: ScanArgs, ctx: &Context) -> Result<()> {
    let scanner = ctx.scanner()?;
    let problem = &ctx.problem;

    let rows: Vec<CandidateRow> = scanner
        .scan(|x| problem.f(x))
        .enumerate()
        .map(|(i, candidate)| CandidateRow {
            index: i + 1,
            location: candidate.location,
            lower: candidate.lower(),
            upper: candidate.upper(),
            residual: problem.f(candidate.location),
        })
        .collect();

    info!(
        problem = problem.name(),
        candidates = rows.len(),
        "scan finished"
    );

    if ctx.format == OutputFormat::Table {
        print_header(&format!(
            "Sign changes of {} on [{}, {}] ({} samples)",
            problem.name(),
            ctx.lower,
            ctx.upper,
            ctx.samples
        ));
        if rows.is_empty() {
            print_warning("Roots on a sample point or of even multiplicity are not detected.");
        }
    }

    print_output(&rows, ctx.format)
}
