//! CLI command implementations.

pub mod compare;
pub mod contraction;
pub mod scan;
pub mod solve;
pub mod survey;

pub use compare::CompareArgs;
pub use contraction::ContractionArgs;
pub use scan::ScanArgs;
pub use solve::SolveArgs;
pub use survey::SurveyArgs;

use rootlab_math::scan::ZeroCrossingScanner;
use rootlab_math::solvers::{ConvergenceResult, SolverConfig};
use rootlab_math::MathResult;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::config::{DynProblem, Settings};
use crate::error::CliResult;
use crate::output::{display_sci, display_value};

/// Everything a command needs, resolved from the settings.
pub struct Context {
    /// The selected problem.
    pub problem: DynProblem,
    /// Validated solver configuration.
    pub config: SolverConfig,
    /// Scan window lower bound.
    pub lower: f64,
    /// Scan window upper bound.
    pub upper: f64,
    /// Scan sample count.
    pub samples: usize,
    /// Output format.
    pub format: OutputFormat,
}

impl Context {
    /// Resolves the settings into a command context.
    pub fn from_settings(settings: &Settings, format: OutputFormat) -> CliResult<Self> {
        let problem = settings.problem()?;
        let config = settings.solver_config()?;
        let (lower, upper) = settings.window(problem.as_ref());

        Ok(Self {
            problem,
            config,
            lower,
            upper,
            samples: settings.scan.samples,
            format,
        })
    }

    /// A scanner over the configured window.
    pub fn scanner(&self) -> CliResult<ZeroCrossingScanner> {
        Ok(ZeroCrossingScanner::new(self.lower, self.upper, self.samples)?)
    }
}

/// One row of an iteration trace.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StepRow {
    #[tabled(rename = "n")]
    pub n: u32,
    #[tabled(rename = "x_n", display_with = "display_value")]
    pub x: f64,
    #[tabled(rename = "|x_n - x_n-1|", display_with = "display_sci")]
    pub delta: f64,
}

impl StepRow {
    /// Trace rows for a history.
    pub fn from_history(history: &rootlab_math::solvers::IterationRecord) -> Vec<Self> {
        history
            .steps()
            .map(|step| Self {
                n: step.n,
                x: step.x,
                delta: step.delta,
            })
            .collect()
    }
}

/// Short status text of an outcome.
pub fn outcome_status(outcome: &MathResult<ConvergenceResult>) -> String {
    match outcome {
        Ok(_) => "converged".to_string(),
        Err(err) if err.is_divergence() => "diverged".to_string(),
        Err(err) if err.is_singular_derivative() => "singular derivative".to_string(),
        Err(_) => "invalid input".to_string(),
    }
}
