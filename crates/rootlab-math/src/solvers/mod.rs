//! Iterative root-finding algorithms.
//!
//! This module provides the two solvers of the engine:
//!
//! - [`fixed_point`]: iterates `x_{n+1} = g(x_n)` for a caller-supplied map `g`
//! - [`newton`]: iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)`
//!
//! Both are driven by the same loop: it records every iterate, measures the
//! step `|x_{n+1} - x_n|` and stops when the step falls to the tolerance or
//! the iteration budget runs out.
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Requires |
//! |--------|-------|----------|
//! | Fixed-point | Linear, rate `\|g'(x*)\|` | A contraction `g` near the root |
//! | Newton | Quadratic near a simple root | The derivative `f'` |
//!
//! # Example
//!
//! ```rust
//! use rootlab_math::solvers::{fixed_point, newton, SolverConfig};
//!
//! let config = SolverConfig::default();
//!
//! let by_map = fixed_point(|x: f64| x.cos(), 0.5, &config).unwrap();
//! let by_newton = newton(|x: f64| x - x.cos(), |x: f64| 1.0 + x.sin(), 0.5, &config).unwrap();
//!
//! assert!((by_map.root - by_newton.root).abs() < 1e-9);
//! assert!(by_newton.iterations < by_map.iterations);
//! ```

mod fixed_point;
mod history;
mod newton;

pub use fixed_point::{fixed_point, FixedPointSolver};
pub use history::{ErrorSequence, IterationRecord, IterationStep};
pub use newton::{newton, NewtonSolver, SINGULAR_DERIVATIVE_THRESHOLD};

use std::fmt;

use log::{debug, trace};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance on the step size `|x_{n+1} - x_n|`.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the tolerance is positive and finite and the budget non-zero.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// The iterative method that produced a result or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Fixed-point iteration `x_{n+1} = g(x_n)`.
    FixedPoint,
    /// Newton's method `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
    Newton,
}

impl Method {
    /// Human-readable method name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FixedPoint => "Fixed-point",
            Self::Newton => "Newton",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a converged solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceResult {
    /// The final iterate.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Every iterate, starting with the start value.
    pub history: IterationRecord,
}

impl ConvergenceResult {
    /// Absolute successive differences of the history.
    pub fn error_sequence(&self) -> ErrorSequence {
        self.history.error_sequence()
    }

    /// Per-iteration trace rows, suitable for tabular display.
    pub fn steps(&self) -> impl Iterator<Item = IterationStep> + '_ {
        self.history.steps()
    }
}

/// Common interface of the iterative solvers.
///
/// Implementors own their callables; the start value and the configuration
/// are supplied per call.
///
/// # Example
///
/// ```rust
/// use rootlab_math::solvers::{FixedPointSolver, IterativeSolver, NewtonSolver, SolverConfig};
///
/// let solvers: Vec<Box<dyn IterativeSolver>> = vec![
///     Box::new(FixedPointSolver::new(|x: f64| x.cos())),
///     Box::new(NewtonSolver::new(|x: f64| x - x.cos(), |x: f64| 1.0 + x.sin())),
/// ];
///
/// for solver in &solvers {
///     let result = solver.solve(0.5, &SolverConfig::default()).unwrap();
///     assert!((result.root - 0.7390851332).abs() < 1e-9);
/// }
/// ```
pub trait IterativeSolver {
    /// Which method this solver implements.
    fn method(&self) -> Method;

    /// Runs the solver from `x0`.
    fn solve(&self, x0: f64, config: &SolverConfig) -> MathResult<ConvergenceResult>;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str {
        self.method().name()
    }
}

/// Why a single step could not be taken.
#[derive(Debug, Clone, Copy)]
pub(crate) enum StepFailure {
    /// `|f'(x)|` fell below the singularity threshold.
    SingularDerivative { derivative: f64 },
}

/// Drives one solver run.
///
/// `step` maps the current iterate to the next one. The loop takes at most
/// `config.max_iterations` steps and terminates on the first step whose size
/// is within the tolerance.
pub(crate) fn iterate<S>(
    method: Method,
    x0: f64,
    config: &SolverConfig,
    step: S,
) -> MathResult<ConvergenceResult>
where
    S: Fn(f64) -> Result<f64, StepFailure>,
{
    config.validate()?;

    let mut history = IterationRecord::new(x0);
    let mut x = x0;
    let mut last_step = f64::NAN;

    for iteration in 1..=config.max_iterations {
        let next = match step(x) {
            Ok(next) => next,
            Err(StepFailure::SingularDerivative { derivative }) => {
                debug!("{method}: singular derivative {derivative:.2e} at x = {x} (iteration {iteration})");
                return Err(MathError::SingularDerivative {
                    iteration,
                    x,
                    derivative,
                    history,
                });
            }
        };

        last_step = (next - x).abs();
        history.push(next);
        x = next;
        trace!("{method}: n = {iteration}, x = {x:.15}, delta = {last_step:.2e}");

        if last_step <= config.tolerance {
            debug!("{method}: converged to {x} after {iteration} iterations");
            return Ok(ConvergenceResult {
                root: x,
                iterations: iteration,
                history,
            });
        }
    }

    debug!(
        "{method}: no convergence after {} iterations (last step {last_step:.2e})",
        config.max_iterations
    );
    Err(MathError::Divergence {
        method,
        iterations: config.max_iterations,
        last_step,
        history,
    })
}
