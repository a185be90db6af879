//! Error types for root-finding operations.

use thiserror::Error;

use crate::solvers::{IterationRecord, Method};

/// A specialized Result type for root-finding operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while locating roots.
///
/// Both iteration failures carry the partial history of the run that raised
/// them, so a caller can inspect or plot the trajectory that failed.
#[derive(Error, Debug, Clone)]
pub enum MathError {
    /// The iteration budget was exhausted before the step size met the tolerance.
    #[error("{method} did not converge after {iterations} iterations (last step: {last_step:.2e})")]
    Divergence {
        /// Solver that diverged.
        method: Method,
        /// Number of iterations attempted.
        iterations: u32,
        /// Size of the final step `|x_n - x_{n-1}|`.
        last_step: f64,
        /// Iterates produced before the budget ran out.
        history: IterationRecord,
    },

    /// The derivative vanished at an iterate, so the Newton step is undefined.
    #[error("Singular derivative at iteration {iteration}: f'({x}) = {derivative:.2e}")]
    SingularDerivative {
        /// Iteration at which the derivative was evaluated (1-based).
        iteration: u32,
        /// The iterate where the derivative vanished.
        x: f64,
        /// The near-zero derivative value.
        derivative: f64,
        /// Iterates produced before the failing step.
        history: IterationRecord,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns the partial history of a failed run, if the error carries one.
    pub fn history(&self) -> Option<&IterationRecord> {
        match self {
            Self::Divergence { history, .. } | Self::SingularDerivative { history, .. } => {
                Some(history)
            }
            Self::InvalidInput { .. } => None,
        }
    }

    /// Consumes the error and returns its partial history, if any.
    pub fn into_history(self) -> Option<IterationRecord> {
        match self {
            Self::Divergence { history, .. } | Self::SingularDerivative { history, .. } => {
                Some(history)
            }
            Self::InvalidInput { .. } => None,
        }
    }

    /// Returns `true` if the error is a divergence (exhausted budget).
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::Divergence { .. })
    }

    /// Returns `true` if the error is a singular derivative.
    pub fn is_singular_derivative(&self) -> bool {
        matches!(self, Self::SingularDerivative { .. })
    }
}
