//! Side-by-side convergence comparison of the two solvers.
//!
//! [`compare_convergence`] runs fixed-point iteration and Newton's method
//! independently and collects both outcomes with their error sequences. A
//! failure in one solver never prevents the other from running; each outcome
//! is kept as its own `Result`.
//!
//! The comparator does not classify the order of convergence itself. The raw
//! [`ErrorSequence`]s are exposed so callers can fit it, for example with
//! [`ErrorSequence::log_log_slope`]: expect a slope near 1 for fixed-point
//! iteration (linear, rate `|g'(x*)|`) and near 2 for Newton's method.

use log::{debug, log_enabled, Level};

use crate::error::MathResult;
use crate::problems::FunctionPair;
use crate::scan::{RootCandidate, ZeroCrossingScanner};
use crate::solvers::{
    fixed_point, newton, ConvergenceResult, ErrorSequence, Method, SolverConfig,
};

/// Error sequences of both runs of a comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorSequences {
    /// Successive differences of the fixed-point run.
    pub fixed_point: ErrorSequence,
    /// Successive differences of the Newton run.
    pub newton: ErrorSequence,
}

/// Outcome of running both solvers.
#[derive(Debug, Clone)]
pub struct ConvergenceComparison {
    /// Fixed-point outcome.
    pub fixed_point: MathResult<ConvergenceResult>,
    /// Newton outcome.
    pub newton: MathResult<ConvergenceResult>,
    /// Error sequences, taken from the partial history when a run failed.
    pub error_sequences: ErrorSequences,
    /// `fixed_point.iterations / newton.iterations`, when both converged and
    /// Newton took at least one iteration.
    pub iteration_ratio: Option<f64>,
}

impl ConvergenceComparison {
    /// Builds the comparison record from two independent outcomes.
    pub fn from_outcomes(
        fixed_point: MathResult<ConvergenceResult>,
        newton: MathResult<ConvergenceResult>,
    ) -> Self {
        let error_sequences = ErrorSequences {
            fixed_point: outcome_errors(&fixed_point),
            newton: outcome_errors(&newton),
        };

        let iteration_ratio = match (&fixed_point, &newton) {
            (Ok(fp), Ok(nt)) if nt.iterations > 0 => {
                Some(f64::from(fp.iterations) / f64::from(nt.iterations))
            }
            _ => None,
        };

        Self {
            fixed_point,
            newton,
            error_sequences,
            iteration_ratio,
        }
    }

    /// Returns `true` if both solvers converged.
    pub fn both_converged(&self) -> bool {
        self.fixed_point.is_ok() && self.newton.is_ok()
    }

    /// The outcome of one method.
    pub fn outcome(&self, method: Method) -> &MathResult<ConvergenceResult> {
        match method {
            Method::FixedPoint => &self.fixed_point,
            Method::Newton => &self.newton,
        }
    }

    /// The error sequence of one method.
    pub fn errors(&self, method: Method) -> &ErrorSequence {
        match method {
            Method::FixedPoint => &self.error_sequences.fixed_point,
            Method::Newton => &self.error_sequences.newton,
        }
    }

    /// The method that converged in fewer iterations.
    ///
    /// If only one method converged, that method; `None` if neither did or
    /// both took the same number of iterations.
    pub fn faster_method(&self) -> Option<Method> {
        match (&self.fixed_point, &self.newton) {
            (Ok(fp), Ok(nt)) if fp.iterations < nt.iterations => Some(Method::FixedPoint),
            (Ok(fp), Ok(nt)) if nt.iterations < fp.iterations => Some(Method::Newton),
            (Ok(_), Err(_)) => Some(Method::FixedPoint),
            (Err(_), Ok(_)) => Some(Method::Newton),
            _ => None,
        }
    }
}

fn outcome_errors(outcome: &MathResult<ConvergenceResult>) -> ErrorSequence {
    match outcome {
        Ok(result) => result.error_sequence(),
        Err(err) => err
            .history()
            .map(|history| history.error_sequence())
            .unwrap_or_default(),
    }
}

/// Runs both solvers and compares their convergence.
///
/// # Arguments
///
/// * `g` - Fixed-point map
/// * `x0_fixed_point` - Start value for fixed-point iteration
/// * `f` - Function for Newton's method
/// * `df` - Derivative of `f`
/// * `x0_newton` - Start value for Newton's method
/// * `config` - Configuration shared by both runs
///
/// # Example
///
/// ```rust
/// use rootlab_math::compare::compare_convergence;
/// use rootlab_math::solvers::SolverConfig;
///
/// let comparison = compare_convergence(
///     |x: f64| x.cos(),
///     0.5,
///     |x: f64| x - x.cos(),
///     |x: f64| 1.0 + x.sin(),
///     0.5,
///     &SolverConfig::default(),
/// );
///
/// assert!(comparison.both_converged());
/// assert!(comparison.iteration_ratio.unwrap() > 5.0);
/// ```
pub fn compare_convergence<G, F, DF>(
    g: G,
    x0_fixed_point: f64,
    f: F,
    df: DF,
    x0_newton: f64,
    config: &SolverConfig,
) -> ConvergenceComparison
where
    G: Fn(f64) -> f64,
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let fp = fixed_point(g, x0_fixed_point, config);
    let nt = newton(f, df, x0_newton, config);
    let comparison = ConvergenceComparison::from_outcomes(fp, nt);
    log_summary(&comparison);
    comparison
}

/// Runs [`compare_convergence`] with both solvers on the rayon thread pool.
///
/// The two runs share no state, so the record is identical to the
/// sequential one.
#[cfg(feature = "parallel")]
pub fn compare_convergence_parallel<G, F, DF>(
    g: G,
    x0_fixed_point: f64,
    f: F,
    df: DF,
    x0_newton: f64,
    config: &SolverConfig,
) -> ConvergenceComparison
where
    G: Fn(f64) -> f64 + Send + Sync,
    F: Fn(f64) -> f64 + Send + Sync,
    DF: Fn(f64) -> f64 + Send + Sync,
{
    let (fp, nt) = rayon::join(
        || fixed_point(&g, x0_fixed_point, config),
        || newton(&f, &df, x0_newton, config),
    );
    let comparison = ConvergenceComparison::from_outcomes(fp, nt);
    log_summary(&comparison);
    comparison
}

/// Runs [`compare_convergence`] on a [`FunctionPair`].
pub fn compare_problem<P>(
    problem: &P,
    x0_fixed_point: f64,
    x0_newton: f64,
    config: &SolverConfig,
) -> ConvergenceComparison
where
    P: FunctionPair + ?Sized,
{
    compare_convergence(
        |x| problem.g(x),
        x0_fixed_point,
        |x| problem.f(x),
        |x| problem.df(x),
        x0_newton,
        config,
    )
}

fn log_summary(comparison: &ConvergenceComparison) {
    if !log_enabled!(Level::Debug) {
        return;
    }
    debug!(
        "comparison: fixed-point {}, Newton {}, ratio {:?}",
        describe(&comparison.fixed_point),
        describe(&comparison.newton),
        comparison.iteration_ratio
    );
}

fn describe(outcome: &MathResult<ConvergenceResult>) -> String {
    match outcome {
        Ok(result) => format!("{} iterations", result.iterations),
        Err(err) => format!("failed ({err})"),
    }
}

/// Comparison of both solvers seeded at one scanned candidate.
#[derive(Debug, Clone)]
pub struct CandidateComparison {
    /// The candidate both solvers started from.
    pub candidate: RootCandidate,
    /// The comparison record.
    pub comparison: ConvergenceComparison,
}

/// Scans a problem for sign changes and compares both solvers at each one.
///
/// Every candidate's midpoint seeds both the fixed-point and the Newton run.
/// Results are returned in scan order; an empty vector means the scan found
/// no sign change.
///
/// # Example
///
/// ```rust
/// use rootlab_math::compare::survey;
/// use rootlab_math::problems::CosineFixedPoint;
/// use rootlab_math::scan::ZeroCrossingScanner;
/// use rootlab_math::solvers::SolverConfig;
///
/// let scanner = ZeroCrossingScanner::new(0.0, 1.0, 100).unwrap();
/// let results = survey(&CosineFixedPoint, &scanner, &SolverConfig::default());
///
/// assert_eq!(results.len(), 1);
/// assert!(results[0].comparison.both_converged());
/// ```
pub fn survey<P>(
    problem: &P,
    scanner: &ZeroCrossingScanner,
    config: &SolverConfig,
) -> Vec<CandidateComparison>
where
    P: FunctionPair + ?Sized,
{
    scanner
        .scan(|x| problem.f(x))
        .map(|candidate| {
            debug!(
                "{}: comparing solvers from candidate {}",
                problem.name(),
                candidate.location
            );
            CandidateComparison {
                candidate,
                comparison: compare_problem(
                    problem,
                    candidate.location,
                    candidate.location,
                    config,
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use crate::problems::{CosineFixedPoint, CubicSine, Quadratic};
    use approx::assert_relative_eq;

    #[test]
    fn test_cosine_comparison() {
        let comparison = compare_problem(&CosineFixedPoint, 0.5, 0.5, &SolverConfig::default());

        let fp = comparison.fixed_point.as_ref().unwrap();
        let nt = comparison.newton.as_ref().unwrap();

        assert_relative_eq!(fp.root, nt.root, epsilon = 1e-9);
        assert!(nt.iterations <= 5);
        assert!((30..=70).contains(&fp.iterations));

        let ratio = comparison.iteration_ratio.unwrap();
        assert_relative_eq!(ratio, f64::from(fp.iterations) / f64::from(nt.iterations));
        assert_eq!(comparison.faster_method(), Some(Method::Newton));
    }

    #[test]
    fn test_error_sequences_follow_histories() {
        let comparison = compare_problem(&CosineFixedPoint, 0.5, 0.5, &SolverConfig::default());
        let fp = comparison.fixed_point.as_ref().unwrap();

        assert_eq!(comparison.error_sequences.fixed_point.len(), fp.history.len() - 1);
        let nt = comparison.newton.as_ref().unwrap();
        assert_eq!(comparison.errors(Method::Newton).len(), nt.iterations as usize);
    }

    #[test]
    fn test_convergence_orders_differ() {
        let comparison = compare_problem(&CosineFixedPoint, 0.5, 0.5, &SolverConfig::default());

        let fp_slope = comparison.error_sequences.fixed_point.log_log_slope().unwrap();
        let nt_slope = comparison.error_sequences.newton.log_log_slope().unwrap();

        assert!((fp_slope - 1.0).abs() < 0.1, "fixed-point slope = {fp_slope}");
        assert!((nt_slope - 2.0).abs() < 0.2, "Newton slope = {nt_slope}");
    }

    #[test]
    fn test_failure_is_isolated() {
        // Newton starts on the critical point of x^2 - 1; fixed point still runs.
        let comparison = compare_convergence(
            |x: f64| x.cos(),
            0.5,
            |x: f64| x * x - 1.0,
            |x: f64| 2.0 * x,
            0.0,
            &SolverConfig::default(),
        );

        assert!(comparison.fixed_point.is_ok());
        assert!(matches!(
            comparison.newton,
            Err(MathError::SingularDerivative { .. })
        ));
        assert!(comparison.iteration_ratio.is_none());
        assert!(comparison.error_sequences.newton.is_empty());
        assert_eq!(comparison.faster_method(), Some(Method::FixedPoint));
    }

    #[test]
    fn test_divergent_run_keeps_partial_errors() {
        // Near the middle zero of the cubic-sine problem g expands.
        let comparison = compare_problem(&CubicSine::default(), 0.3, 0.3, &SolverConfig::default());

        assert!(comparison.fixed_point.as_ref().unwrap_err().is_divergence());
        assert_eq!(comparison.error_sequences.fixed_point.len(), 100);
        assert_relative_eq!(
            comparison.newton.as_ref().unwrap().root,
            0.298_743_646,
            epsilon = 1e-8
        );
        assert!(comparison.iteration_ratio.is_none());
    }

    #[test]
    fn test_ratio_undefined_for_zero_newton_iterations() {
        let fp = fixed_point(|x: f64| x.cos(), 0.5, &SolverConfig::default());
        let nt = Ok(ConvergenceResult {
            root: 1.0,
            iterations: 0,
            history: crate::solvers::IterationRecord::new(1.0),
        });

        let comparison = ConvergenceComparison::from_outcomes(fp, nt);
        assert!(comparison.iteration_ratio.is_none());
    }

    #[test]
    fn test_neither_converges() {
        let comparison = compare_convergence(
            |x: f64| 2.0 * x + 1.0,
            0.0,
            |x: f64| x * x + 1.0,
            |x: f64| 2.0 * x,
            0.0,
            &SolverConfig::new(1e-10, 25),
        );

        assert!(!comparison.both_converged());
        assert!(comparison.faster_method().is_none());
        assert_eq!(comparison.error_sequences.fixed_point.len(), 25);
        assert!(comparison.outcome(Method::Newton).is_err());
    }

    #[test]
    fn test_survey_cubic_sine() {
        let problem = CubicSine::default();
        // The zero at x = 1 sits on the last sample; whether it shows up
        // depends on how f(1) rounds. Stop short of it to keep the interior zeros.
        let scanner = ZeroCrossingScanner::new(0.0, 0.95, 1000).unwrap();
        let config = SolverConfig::default().with_max_iterations(300);
        let results = survey(&problem, &scanner, &config);

        // The zero at 0 sits on a sample and is not reported.
        assert_eq!(results.len(), 2);

        for result in &results {
            let newton = result.comparison.newton.as_ref().unwrap();
            assert!(problem.f(newton.root).abs() < 1e-10);
            assert!(result.candidate.contains(newton.root));
        }

        // Fixed-point iteration cannot settle on the repelling zero near 0.2987.
        assert!(results[0].comparison.fixed_point.is_err());
        let attracted = results[1].comparison.fixed_point.as_ref().unwrap();
        assert_relative_eq!(attracted.root, 0.842_413_5, epsilon = 1e-6);
        assert!(results[1].comparison.iteration_ratio.unwrap() > 10.0);
    }

    #[test]
    fn test_survey_quadratic() {
        let problem = Quadratic::new(0.25);
        let scanner = ZeroCrossingScanner::new(-1.0, 1.0, 100).unwrap();
        let results = survey(&problem, &scanner, &SolverConfig::default());

        assert_eq!(results.len(), 2);
        // g'(x) = 1 - 2x: the zero at -0.5 repels, the one at 0.5 attracts.
        assert!(results[0].comparison.fixed_point.is_err());
        assert_relative_eq!(
            results[1].comparison.fixed_point.as_ref().unwrap().root,
            0.5,
            epsilon = 1e-9
        );
        for result in &results {
            assert!(result.comparison.newton.is_ok());
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = SolverConfig::default();
        let sequential = compare_problem(&CosineFixedPoint, 0.5, 0.5, &config);
        let parallel = compare_convergence_parallel(
            |x: f64| x.cos(),
            0.5,
            |x: f64| x - x.cos(),
            |x: f64| 1.0 + x.sin(),
            0.5,
            &config,
        );

        assert_eq!(
            sequential.fixed_point.unwrap(),
            parallel.fixed_point.unwrap()
        );
        assert_eq!(sequential.newton.unwrap(), parallel.newton.unwrap());
        assert_eq!(sequential.iteration_ratio, parallel.iteration_ratio);
    }
}
