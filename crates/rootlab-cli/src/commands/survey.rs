//! Survey command implementation.
//!
//! Scans for sign changes, then seeds both solvers at every candidate.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use rootlab_math::compare::survey;
use rootlab_math::solvers::{ConvergenceResult, Method};
use rootlab_math::MathResult;

use crate::cli::OutputFormat;
use crate::commands::{outcome_status, Context};
use crate::output::{display_option, display_value, print_header, print_output};

/// Arguments for the survey command.
#[derive(Args, Debug)]
pub struct SurveyArgs {}

/// One surveyed candidate.
#[derive(Debug, Serialize, Tabled)]
pub struct SurveyRow {
    #[tabled(rename = "Candidate", display_with = "display_value")]
    pub candidate: f64,
    #[tabled(rename = "Fixed-point")]
    pub fixed_point_status: String,
    #[tabled(rename = "FP root", display_with = "display_option")]
    pub fixed_point_root: Option<f64>,
    #[tabled(rename = "FP iter.")]
    pub fixed_point_iterations: String,
    #[tabled(rename = "Newton")]
    pub newton_status: String,
    #[tabled(rename = "Newton root", display_with = "display_option")]
    pub newton_root: Option<f64>,
    #[tabled(rename = "Newton iter.")]
    pub newton_iterations: String,
    #[tabled(rename = "Ratio", display_with = "display_option")]
    pub iteration_ratio: Option<f64>,
}

/// Execute the survey command.
pub fn execute(_args: SurveyArgs, ctx: &Context) -> Result<()> {
    let scanner = ctx.scanner()?;
    let results = survey(&ctx.problem, &scanner, &ctx.config);

    info!(candidates = results.len(), "survey finished");

    let rows: Vec<SurveyRow> = results
        .iter()
        .map(|result| {
            let comparison = &result.comparison;
            let fixed_point = comparison.outcome(Method::FixedPoint);
            let newton = comparison.outcome(Method::Newton);

            SurveyRow {
                candidate: result.candidate.location,
                fixed_point_status: outcome_status(fixed_point),
                fixed_point_root: root(fixed_point),
                fixed_point_iterations: iterations(fixed_point),
                newton_status: outcome_status(newton),
                newton_root: root(newton),
                newton_iterations: iterations(newton),
                iteration_ratio: comparison.iteration_ratio,
            }
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header(&format!(
            "Survey of {} on [{}, {}]",
            ctx.problem.name(),
            ctx.lower,
            ctx.upper
        ));
    }

    print_output(&rows, ctx.format)
}

fn root(outcome: &MathResult<ConvergenceResult>) -> Option<f64> {
    outcome.as_ref().ok().map(|result| result.root)
}

fn iterations(outcome: &MathResult<ConvergenceResult>) -> String {
    match outcome {
        Ok(result) => result.iterations.to_string(),
        Err(_) => "-".to_string(),
    }
}
