//! Fixed-point iteration.

use crate::error::MathResult;
use crate::solvers::{iterate, ConvergenceResult, IterativeSolver, Method, SolverConfig};

/// Fixed-point iteration.
///
/// Uses the iteration:
/// `x_{n+1} = g(x_n)`
///
/// Converges linearly to a fixed point `x* = g(x*)` when `g` is a contraction
/// near `x*`, i.e. `|g'(x)| < 1`; the rate is roughly `|g'(x*)|`. The map is
/// evaluated as given: if it leaves its domain or returns non-finite values,
/// those values are recorded in the history and the run ends in divergence.
///
/// # Arguments
///
/// * `g` - The fixed-point map
/// * `x0` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Returns
///
/// The fixed point and iteration history, or [`MathError::Divergence`] with
/// the partial history if the budget runs out.
///
/// [`MathError::Divergence`]: crate::error::MathError::Divergence
///
/// # Example
///
/// ```rust
/// use rootlab_math::solvers::{fixed_point, SolverConfig};
///
/// // The Dottie number: x = cos(x)
/// let result = fixed_point(|x: f64| x.cos(), 0.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.7390851332).abs() < 1e-9);
/// ```
pub fn fixed_point<G>(g: G, x0: f64, config: &SolverConfig) -> MathResult<ConvergenceResult>
where
    G: Fn(f64) -> f64,
{
    iterate(Method::FixedPoint, x0, config, |x| Ok(g(x)))
}

/// Fixed-point solver owning its map.
#[derive(Debug, Clone, Copy)]
pub struct FixedPointSolver<G> {
    map: G,
}

impl<G> FixedPointSolver<G>
where
    G: Fn(f64) -> f64,
{
    /// Creates a solver for the map `g`.
    pub fn new(map: G) -> Self {
        Self { map }
    }
}

impl<G> IterativeSolver for FixedPointSolver<G>
where
    G: Fn(f64) -> f64,
{
    fn method(&self) -> Method {
        Method::FixedPoint
    }

    fn solve(&self, x0: f64, config: &SolverConfig) -> MathResult<ConvergenceResult> {
        fixed_point(&self.map, x0, config)
    }
}
