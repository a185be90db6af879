//! Layered settings: built-in defaults, then the config file, then flags.
//!
//! ```toml
//! [solver]
//! tolerance = 1e-10
//! max_iterations = 300
//!
//! [scan]
//! samples = 1000
//!
//! [problem]
//! kind = "cubic-sine"
//! length = 1.0
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use rootlab_math::problems::{CosineFixedPoint, CubicSine, FunctionPair, Quadratic};
use rootlab_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::cli::{Overrides, ProblemKind};
use crate::error::{CliError, CliResult};

/// Default number of scan samples.
pub const DEFAULT_SAMPLES: usize = 1000;

/// A problem that can be shared with the rayon pool.
pub type DynProblem = Box<dyn FunctionPair + Send + Sync>;

/// All settings of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Solver settings.
    pub solver: SolverSettings,
    /// Scan settings.
    pub scan: ScanSettings,
    /// Problem selection.
    pub problem: ProblemSettings,
}

/// `[solver]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    /// Step-size tolerance.
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// `[scan]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSettings {
    /// Number of sample points.
    pub samples: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// `[problem]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProblemSettings {
    /// Which built-in problem.
    pub kind: ProblemKind,
    /// Interval length of the cubic-sine problem.
    pub length: f64,
    /// Constant of the quadratic problem.
    pub constant: f64,
    /// Scan window lower bound; the problem's domain when absent.
    pub lower: Option<f64>,
    /// Scan window upper bound; the problem's domain when absent.
    pub upper: Option<f64>,
}

impl Default for ProblemSettings {
    fn default() -> Self {
        Self {
            kind: ProblemKind::default(),
            length: CubicSine::default().length,
            constant: Quadratic::default().constant,
            lower: None,
            upper: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded config file");
        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(kind) = overrides.problem {
            self.problem.kind = kind;
        }
        if let Some(length) = overrides.length {
            self.problem.length = length;
        }
        if let Some(constant) = overrides.constant {
            self.problem.constant = constant;
        }
        if overrides.lower.is_some() {
            self.problem.lower = overrides.lower;
        }
        if overrides.upper.is_some() {
            self.problem.upper = overrides.upper;
        }
        if let Some(samples) = overrides.samples {
            self.scan.samples = samples;
        }
        if let Some(tolerance) = overrides.tolerance {
            self.solver.tolerance = tolerance;
        }
        if let Some(max_iterations) = overrides.max_iterations {
            self.solver.max_iterations = max_iterations;
        }
        self
    }

    /// The solver configuration, validated.
    pub fn solver_config(&self) -> CliResult<SolverConfig> {
        let config = SolverConfig::new(self.solver.tolerance, self.solver.max_iterations);
        config.validate()?;
        Ok(config)
    }

    /// The selected problem.
    pub fn problem(&self) -> CliResult<DynProblem> {
        let problem: DynProblem = match self.problem.kind {
            ProblemKind::CubicSine => {
                let length = self.problem.length;
                if !(length.is_finite() && length > 0.0) {
                    return Err(CliError::InvalidArgument(format!(
                        "length must be positive, got {length}"
                    )));
                }
                Box::new(CubicSine::new(length))
            }
            ProblemKind::Cosine => Box::new(CosineFixedPoint),
            ProblemKind::Quadratic => Box::new(Quadratic::new(self.problem.constant)),
        };
        Ok(problem)
    }

    /// The scan window: the problem's domain unless overridden.
    pub fn window(&self, problem: &dyn FunctionPair) -> (f64, f64) {
        let (lower, upper) = problem.domain();
        (
            self.problem.lower.unwrap_or(lower),
            self.problem.upper.unwrap_or(upper),
        )
    }
}
