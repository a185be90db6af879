//! Contraction command implementation.
//!
//! Lists where |g'(x)| < 1, i.e. where fixed-point iteration can be seeded.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rootlab_math::contraction::contraction_regions;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{display_value, print_header, print_output, print_warning};

/// Arguments for the contraction command.
#[derive(Args, Debug)]
pub struct ContractionArgs {}

/// One contraction region.
#[derive(Debug, Serialize, Tabled)]
pub struct RegionRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Lower", display_with = "display_value")]
    pub lower: f64,
    #[tabled(rename = "Upper", display_with = "display_value")]
    pub upper: f64,
    #[tabled(rename = "max |g'|", display_with = "display_value")]
    pub max_rate: f64,
}

/// Execute the contraction command.
pub fn execute(_args: ContractionArgs, ctx: &Context) -> Result<()> {
    let problem = &ctx.problem;
    let regions = contraction_regions(|x: f64| problem.dg(x), ctx.lower, ctx.upper, ctx.samples)?;

    let rows: Vec<RegionRow> = regions
        .iter()
        .enumerate()
        .map(|(i, region)| RegionRow {
            index: i + 1,
            lower: region.lower,
            upper: region.upper,
            max_rate: region.max_rate,
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header(&format!(
            "Regions of {} where |g'(x)| < 1 on [{}, {}]",
            problem.name(),
            ctx.lower,
            ctx.upper
        ));
        if rows.is_empty() {
            print_warning("The fixed-point map does not contract anywhere in the window.");
        }
    }

    print_output(&rows, ctx.format)
}
