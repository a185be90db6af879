//! # Rootlab Math
//!
//! Iterative root finding for scalar functions.
//!
//! This crate provides:
//!
//! - **Solvers**: Fixed-point iteration and Newton's method with full iteration histories
//! - **Scanning**: Sign-change detection on a sample grid for coarse root locations
//! - **Comparison**: Side-by-side runs of both solvers with their error sequences
//! - **Contraction analysis**: Where `|g'(x)| < 1` holds for a fixed-point map
//! - **Problems**: Reference functions bundled with derivatives and fixed-point maps
//!
//! ## Design Philosophy
//!
//! - **Caller-supplied calculus**: Derivatives and fixed-point maps are inputs, never derived
//! - **Explicit configuration**: Every run is determined by its arguments
//! - **Failures keep evidence**: A failed run still returns the iterates it produced

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::len_without_is_empty)]

pub mod compare;
pub mod contraction;
pub mod error;
pub mod problems;
pub mod scan;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    #[cfg(feature = "parallel")]
    pub use crate::compare::compare_convergence_parallel;
    pub use crate::compare::{
        compare_convergence, compare_problem, survey, CandidateComparison, ConvergenceComparison,
        ErrorSequences,
    };
    pub use crate::contraction::{contraction_regions, ContractionRegion};
    pub use crate::error::{MathError, MathResult};
    pub use crate::problems::{CosineFixedPoint, CubicSine, FunctionPair, Quadratic};
    pub use crate::scan::{RootCandidate, SampleGrid, ZeroCrossingScanner};
    pub use crate::solvers::{
        fixed_point, newton, ConvergenceResult, ErrorSequence, FixedPointSolver, IterationRecord,
        IterationStep, IterativeSolver, Method, NewtonSolver, SolverConfig,
    };
}

pub use error::{MathError, MathResult};
