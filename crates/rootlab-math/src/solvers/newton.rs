//! Newton-Raphson root-finding algorithm.

use crate::error::MathResult;
use crate::solvers::{
    iterate, ConvergenceResult, IterativeSolver, Method, SolverConfig, StepFailure,
};

/// Derivative magnitude below which a Newton step is refused.
pub const SINGULAR_DERIVATIVE_THRESHOLD: f64 = 1e-15;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near a simple root but requires
/// the derivative of the function. If `|f'(x_n)|` falls below
/// [`SINGULAR_DERIVATIVE_THRESHOLD`] the run stops with
/// [`MathError::SingularDerivative`] without taking the step.
///
/// [`MathError::SingularDerivative`]: crate::error::MathError::SingularDerivative
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `x0` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration history, or an error carrying the partial history.
///
/// # Example
///
/// ```rust
/// use rootlab_math::solvers::{newton, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton<F, DF>(f: F, df: DF, x0: f64, config: &SolverConfig) -> MathResult<ConvergenceResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    iterate(Method::Newton, x0, config, |x| {
        let dfx = df(x);

        if dfx.abs() < SINGULAR_DERIVATIVE_THRESHOLD {
            return Err(StepFailure::SingularDerivative { derivative: dfx });
        }

        Ok(x - f(x) / dfx)
    })
}

/// Newton solver owning its function and derivative.
#[derive(Debug, Clone, Copy)]
pub struct NewtonSolver<F, DF> {
    f: F,
    df: DF,
}

impl<F, DF> NewtonSolver<F, DF>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    /// Creates a solver for `f` with derivative `df`.
    pub fn new(f: F, df: DF) -> Self {
        Self { f, df }
    }
}

impl<F, DF> IterativeSolver for NewtonSolver<F, DF>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    fn method(&self) -> Method {
        Method::Newton
    }

    fn solve(&self, x0: f64, config: &SolverConfig) -> MathResult<ConvergenceResult> {
        newton(&self.f, &self.df, x0, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::cell::Cell;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_cube_root() {
        // Find cube root of 27 (should be 3)
        let f = |x: f64| x * x * x - 27.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton(f, df, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cosine_scenario() {
        let f = |x: f64| x - x.cos();
        let df = |x: f64| 1.0 + x.sin();

        let result = newton(f, df, 0.5, &SolverConfig::new(1e-10, 100)).unwrap();

        assert_relative_eq!(result.root, 0.739_085_133_2, epsilon = 1e-10);
        assert!(result.iterations <= 5);
        assert_eq!(result.history.start(), 0.5);
        assert_eq!(result.history.len(), result.iterations as usize + 1);
    }

    #[test]
    fn test_quadratic_error_decay() {
        let f = |x: f64| x - x.cos();
        let df = |x: f64| 1.0 + x.sin();

        let errors = newton(f, df, 0.5, &SolverConfig::default())
            .unwrap()
            .error_sequence();

        let slope = errors.log_log_slope().unwrap();
        assert!((slope - 2.0).abs() < 0.2, "slope = {slope}");

        let order = errors.estimated_order().unwrap();
        assert!((order - 2.0).abs() < 0.2, "order = {order}");
    }

    #[test]
    fn test_zero_derivative_error() {
        let f = |x: f64| x * x - 1.0;
        let df = |x: f64| 2.0 * x;

        let err = newton(f, df, 0.0, &SolverConfig::default()).unwrap_err();

        match err {
            MathError::SingularDerivative {
                iteration,
                x,
                derivative,
                history,
            } => {
                assert_eq!(iteration, 1);
                assert_eq!(x, 0.0);
                assert_eq!(derivative, 0.0);
                assert_eq!(history.as_slice(), &[0.0]);
            }
            other => panic!("expected singular derivative, got {other:?}"),
        }
    }

    #[test]
    fn test_singular_derivative_never_divides() {
        let f_calls = Cell::new(0u32);
        let f = |x: f64| {
            f_calls.set(f_calls.get() + 1);
            x * x * x - 1.0
        };
        let df = |x: f64| 3.0 * x * x;

        let result = newton(f, df, 0.0, &SolverConfig::default());

        assert!(result.unwrap_err().is_singular_derivative());
        assert_eq!(f_calls.get(), 0);
    }

    #[test]
    fn test_singular_derivative_mid_run() {
        // Derivative with a flat region below 1.5, reached by the first step.
        let f = |x: f64| x - 1.0;
        let df = |x: f64| if x < 1.5 { 0.0 } else { 1.0 / (x - 1.0) };

        // From x0 = 3: df = 0.5, step to 3 - 2 / 0.5 = -1, then df(-1) = 0.
        let err = newton(f, df, 3.0, &SolverConfig::default()).unwrap_err();

        match err {
            MathError::SingularDerivative {
                iteration, history, ..
            } => {
                assert_eq!(iteration, 2);
                assert_eq!(history.as_slice(), &[3.0, -1.0]);
                assert_eq!(history.len(), iteration as usize);
            }
            other => panic!("expected singular derivative, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_diverges() {
        // f(x) = x^3 - 2x + 2 cycles between 0 and 1 under Newton from x0 = 0.
        let f = |x: f64| x * x * x - 2.0 * x + 2.0;
        let df = |x: f64| 3.0 * x * x - 2.0;

        let err = newton(f, df, 0.0, &SolverConfig::new(1e-10, 20)).unwrap_err();

        match err {
            MathError::Divergence {
                method,
                iterations,
                history,
                ..
            } => {
                assert_eq!(method, Method::Newton);
                assert_eq!(iterations, 20);
                assert_eq!(history.len(), 21);
                assert_relative_eq!(history.as_slice()[1], 1.0);
                assert_relative_eq!(history.as_slice()[2], 0.0);
            }
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_history_invariant(x0 in 0.2f64..5.0) {
            let result = newton(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, x0, &SolverConfig::default()).unwrap();

            prop_assert_eq!(result.history.start(), x0);
            prop_assert_eq!(result.history.len(), result.iterations as usize + 1);
            prop_assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
        }
    }
}
