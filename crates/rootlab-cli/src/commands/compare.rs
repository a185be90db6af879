//! Compare command implementation.
//!
//! Runs fixed-point iteration and Newton's method and prints both outcomes,
//! the iteration ratio and the two error sequences side by side.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rootlab_math::compare::{compare_convergence_parallel, compare_problem, ConvergenceComparison};
use rootlab_math::solvers::{ErrorSequence, Method};

use crate::cli::OutputFormat;
use crate::commands::{outcome_status, Context};
use crate::output::{
    display_option, display_option_sci, format_sci, print_header, print_output, print_single,
    print_table, KeyValue,
};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Start value for fixed-point iteration (and Newton unless --x0-newton is given)
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Separate start value for Newton's method
    #[arg(long, allow_negative_numbers = true)]
    pub x0_newton: Option<f64>,

    /// Run the two solvers on separate threads
    #[arg(long)]
    pub parallel: bool,
}

/// Per-method summary.
#[derive(Debug, Serialize, Tabled)]
pub struct MethodSummary {
    #[tabled(rename = "Method")]
    pub method: &'static str,
    #[tabled(rename = "Start")]
    pub start: f64,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Root", display_with = "display_option")]
    pub root: Option<f64>,
    #[tabled(rename = "Iterations")]
    pub iterations: usize,
    #[tabled(rename = "Order", display_with = "display_option")]
    pub estimated_order: Option<f64>,
    #[tabled(rename = "Log-log slope", display_with = "display_option")]
    pub log_log_slope: Option<f64>,
}

/// One row of the side-by-side error table.
#[derive(Debug, Serialize, Tabled)]
pub struct ErrorRow {
    #[tabled(rename = "n")]
    pub n: usize,
    #[tabled(rename = "Fixed-point |dx|", display_with = "display_option_sci")]
    pub fixed_point: Option<f64>,
    #[tabled(rename = "Newton |dx|", display_with = "display_option_sci")]
    pub newton: Option<f64>,
}

/// Machine-readable comparison report.
#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub problem: &'static str,
    pub methods: Vec<MethodSummary>,
    pub iteration_ratio: Option<f64>,
    pub error_sequences: ErrorSequencesReport,
}

/// Raw error sequences.
#[derive(Debug, Serialize)]
pub struct ErrorSequencesReport {
    pub fixed_point: Vec<f64>,
    pub newton: Vec<f64>,
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    let problem = &ctx.problem;
    let x0_fixed_point = args.x0;
    let x0_newton = args.x0_newton.unwrap_or(args.x0);

    let comparison = if args.parallel {
        compare_convergence_parallel(
            |x: f64| problem.g(x),
            x0_fixed_point,
            |x: f64| problem.f(x),
            |x: f64| problem.df(x),
            x0_newton,
            &ctx.config,
        )
    } else {
        compare_problem(problem, x0_fixed_point, x0_newton, &ctx.config)
    };

    let report = CompareReport {
        problem: problem.name(),
        methods: vec![
            summarize(&comparison, Method::FixedPoint, x0_fixed_point),
            summarize(&comparison, Method::Newton, x0_newton),
        ],
        iteration_ratio: comparison.iteration_ratio,
        error_sequences: ErrorSequencesReport {
            fixed_point: comparison.error_sequences.fixed_point.as_slice().to_vec(),
            newton: comparison.error_sequences.newton.as_slice().to_vec(),
        },
    };

    match ctx.format {
        OutputFormat::Table => print_report(&report, &comparison)?,
        OutputFormat::Json => print_single(&report)?,
        OutputFormat::Csv => print_output(&error_rows(&comparison), OutputFormat::Csv)?,
        OutputFormat::Minimal => match report.iteration_ratio {
            Some(ratio) => println!("{}", ratio),
            None => println!("-"),
        },
    }
    Ok(())
}

fn summarize(comparison: &ConvergenceComparison, method: Method, start: f64) -> MethodSummary {
    let outcome = comparison.outcome(method);
    let errors = comparison.errors(method);

    MethodSummary {
        method: method.name(),
        start,
        status: outcome_status(outcome),
        root: outcome.as_ref().ok().map(|result| result.root),
        iterations: errors.len(),
        estimated_order: errors.estimated_order(),
        log_log_slope: errors.log_log_slope(),
    }
}

fn error_rows(comparison: &ConvergenceComparison) -> Vec<ErrorRow> {
    let fixed_point = &comparison.error_sequences.fixed_point;
    let newton = &comparison.error_sequences.newton;
    let len = fixed_point.len().max(newton.len());

    (0..len)
        .map(|i| ErrorRow {
            n: i + 1,
            fixed_point: value_at(fixed_point, i),
            newton: value_at(newton, i),
        })
        .collect()
}

fn value_at(errors: &ErrorSequence, i: usize) -> Option<f64> {
    errors.as_slice().get(i).copied()
}

fn print_report(report: &CompareReport, comparison: &ConvergenceComparison) -> Result<()> {
    print_header(&format!("Convergence comparison on {}", report.problem));
    print_table(&report.methods)?;

    for method in [Method::FixedPoint, Method::Newton] {
        if let Err(err) = comparison.outcome(method) {
            println!("{}: {}", method, err);
        }
    }

    let ratio = report
        .iteration_ratio
        .map_or_else(|| "unavailable".to_string(), |r| format!("{:.1}x", r));
    print_table(&[KeyValue::new("Iteration ratio (fixed-point / Newton)", ratio)])?;

    print_header("Successive differences");
    let rows = error_rows(comparison);
    print_table(&rows)?;

    if let Some(last) = comparison.error_sequences.newton.as_slice().last() {
        println!("Final Newton step: {}", format_sci(*last));
    }
    Ok(())
}
