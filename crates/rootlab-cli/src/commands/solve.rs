//! Solve command implementation.
//!
//! Runs one solver from a start value. A failed run still prints the
//! trajectory it produced before the command exits with an error.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use rootlab_math::solvers::{FixedPointSolver, IterativeSolver, Method, NewtonSolver};

use crate::cli::OutputFormat;
use crate::commands::{outcome_status, Context, StepRow};
use crate::error::CliError;
use crate::output::{
    format_sci, format_value, print_error, print_header, print_output, print_single,
    print_success, print_table, KeyValue,
};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Solver to run
    #[arg(short, long, value_enum, default_value = "newton")]
    pub method: MethodArg,

    /// Start value
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Print every iteration
    #[arg(short, long)]
    pub trace: bool,
}

/// Solver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Fixed-point iteration on g
    FixedPoint,
    /// Newton's method on f
    Newton,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::FixedPoint => Method::FixedPoint,
            MethodArg::Newton => Method::Newton,
        }
    }
}

/// Machine-readable solve report.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub problem: &'static str,
    pub method: &'static str,
    pub status: String,
    pub root: Option<f64>,
    pub iterations: u32,
    pub residual: Option<f64>,
    pub error: Option<String>,
    pub steps: Vec<StepRow>,
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, ctx: &Context) -> Result<()> {
    let problem = &ctx.problem;
    let method = Method::from(args.method);

    let fixed_point = FixedPointSolver::new(|x: f64| problem.g(x));
    let newton = NewtonSolver::new(|x: f64| problem.f(x), |x: f64| problem.df(x));
    let solver: &dyn IterativeSolver = match method {
        Method::FixedPoint => &fixed_point,
        Method::Newton => &newton,
    };

    let outcome = solver.solve(args.x0, &ctx.config);
    let status = outcome_status(&outcome);

    let (root, iterations, steps, error) = match &outcome {
        Ok(result) => {
            info!(
                method = %method,
                iterations = result.iterations,
                root = result.root,
                "converged"
            );
            (
                Some(result.root),
                result.iterations,
                StepRow::from_history(&result.history),
                None,
            )
        }
        Err(err) => {
            warn!(method = %method, error = %err, "solver failed");
            let steps = err.history().map(StepRow::from_history).unwrap_or_default();
            (None, steps.len() as u32, steps, Some(err.to_string()))
        }
    };

    let report = SolveReport {
        problem: problem.name(),
        method: solver.name(),
        status,
        root,
        iterations,
        residual: root.map(|x| problem.f(x)),
        error,
        steps,
    };

    match ctx.format {
        OutputFormat::Table => print_report(&report, args.trace)?,
        OutputFormat::Json => print_single(&report)?,
        OutputFormat::Csv => print_output(&report.steps, OutputFormat::Csv)?,
        OutputFormat::Minimal => {
            if let Some(root) = report.root {
                println!("{}", root);
            }
        }
    }

    match outcome {
        Ok(_) => Ok(()),
        Err(err) => Err(CliError::from(err).into()),
    }
}

fn print_report(report: &SolveReport, trace: bool) -> Result<()> {
    print_header(&format!("{} on {}", report.method, report.problem));

    let mut rows = vec![
        KeyValue::new("Status", report.status.clone()),
        KeyValue::new("Iterations", report.iterations.to_string()),
    ];
    if let Some(root) = report.root {
        rows.push(KeyValue::new("Root", format_value(root)));
    }
    if let Some(residual) = report.residual {
        rows.push(KeyValue::new("f(root)", format_sci(residual)));
    }
    print_table(&rows)?;

    match &report.error {
        None => {
            print_success("Tolerance met");
            if trace {
                print_header("Iterations");
                print_table(&report.steps)?;
            }
        }
        Some(error) => {
            print_error(error);
            // Failed runs always show how they got there.
            print_header("Partial trajectory");
            print_table(&report.steps)?;
        }
    }
    Ok(())
}
