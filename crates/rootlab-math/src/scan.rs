//! Zero-crossing scan for coarse root locations.
//!
//! The scanner samples a function on an evenly spaced grid and reports every
//! adjacent pair of samples with strictly opposite signs. Each report is a
//! [`RootCandidate`]: the midpoint of the pair plus the bracketing interval,
//! intended as a seed for [`fixed_point`](crate::solvers::fixed_point) or
//! [`newton`](crate::solvers::newton).
//!
//! # Limitations
//!
//! Detection relies on point sampling only:
//!
//! - A sample landing exactly on a root evaluates to zero and is **not** a
//!   sign change, so that root is not reported.
//! - Roots of even multiplicity (e.g. `x^2` at 0) touch zero without
//!   crossing it and are never reported.
//! - Two roots closer together than the sample spacing can cancel out
//!   between samples and go unreported.
//!
//! Increase the sample count to tighten the spacing; none of these cases is
//! detected or corrected.

use std::iter::FusedIterator;

use log::trace;

use crate::error::{MathError, MathResult};

/// An evenly spaced grid of `samples` points over `[lower, upper]`.
///
/// The first point is exactly `lower` and the last exactly `upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    lower: f64,
    upper: f64,
    samples: usize,
}

impl SampleGrid {
    /// Creates a grid, validating that the interval and its width are finite,
    /// that it is non-empty and that there are at least two samples.
    pub fn new(lower: f64, upper: f64, samples: usize) -> MathResult<Self> {
        if !(lower.is_finite() && upper.is_finite()) {
            return Err(MathError::invalid_input(format!(
                "interval bounds must be finite, got [{lower}, {upper}]"
            )));
        }
        if lower >= upper {
            return Err(MathError::invalid_input(format!(
                "interval lower bound must be below upper bound, got [{lower}, {upper}]"
            )));
        }
        if !(upper - lower).is_finite() {
            return Err(MathError::invalid_input(format!(
                "interval width must be finite, got [{lower}, {upper}]"
            )));
        }
        if samples < 2 {
            return Err(MathError::invalid_input(format!(
                "need at least 2 samples, got {samples}"
            )));
        }
        Ok(Self {
            lower,
            upper,
            samples,
        })
    }

    /// Lower bound of the interval.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound of the interval.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Number of sample points.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Distance between adjacent sample points.
    pub fn spacing(&self) -> f64 {
        (self.upper - self.lower) / (self.samples - 1) as f64
    }

    /// The `index`-th sample point.
    pub fn point(&self, index: usize) -> f64 {
        if index + 1 >= self.samples {
            self.upper
        } else {
            self.lower + index as f64 * self.spacing()
        }
    }

    /// Iterates over all sample points in increasing order.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(move |i| self.point(i))
    }
}

/// A coarse root location produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootCandidate {
    /// Midpoint of the bracketing interval.
    pub location: f64,
    /// Adjacent sample points `(lo, hi)` where the function changes sign.
    pub bracket: (f64, f64),
}

impl RootCandidate {
    /// Lower end of the bracket.
    pub fn lower(&self) -> f64 {
        self.bracket.0
    }

    /// Upper end of the bracket.
    pub fn upper(&self) -> f64 {
        self.bracket.1
    }

    /// Width of the bracket.
    pub fn width(&self) -> f64 {
        self.bracket.1 - self.bracket.0
    }

    /// Returns `true` if `x` lies inside the closed bracket.
    pub fn contains(&self, x: f64) -> bool {
        self.bracket.0 <= x && x <= self.bracket.1
    }
}

/// Sign-change scanner over a fixed sample grid.
///
/// # Example
///
/// ```rust
/// use rootlab_math::scan::ZeroCrossingScanner;
///
/// let scanner = ZeroCrossingScanner::new(-1.0, 1.0, 100).unwrap();
/// let candidates: Vec<_> = scanner.scan(|x: f64| x * x - 0.25).collect();
///
/// assert_eq!(candidates.len(), 2);
/// assert!((candidates[0].location + 0.5).abs() < 0.02);
/// assert!((candidates[1].location - 0.5).abs() < 0.02);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroCrossingScanner {
    grid: SampleGrid,
}

impl ZeroCrossingScanner {
    /// Creates a scanner sampling `samples` points over `[lower, upper]`.
    pub fn new(lower: f64, upper: f64, samples: usize) -> MathResult<Self> {
        Ok(Self {
            grid: SampleGrid::new(lower, upper, samples)?,
        })
    }

    /// Creates a scanner over an existing grid.
    pub fn from_grid(grid: SampleGrid) -> Self {
        Self { grid }
    }

    /// The sample grid.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Returns a lazy iterator over the sign changes of `f`.
    ///
    /// `f` is evaluated only as the iterator advances. Each call starts a
    /// fresh scan.
    pub fn scan<F>(&self, f: F) -> Crossings<F>
    where
        F: Fn(f64) -> f64,
    {
        Crossings {
            grid: self.grid,
            f,
            index: 0,
            previous: None,
        }
    }
}

/// Iterator over the root candidates of one scan.
#[derive(Debug, Clone)]
pub struct Crossings<F> {
    grid: SampleGrid,
    f: F,
    index: usize,
    previous: Option<(f64, f64)>,
}

impl<F> Iterator for Crossings<F>
where
    F: Fn(f64) -> f64,
{
    type Item = RootCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.grid.samples {
            let x = self.grid.point(self.index);
            let fx = (self.f)(x);
            self.index += 1;

            if let Some((px, pfx)) = self.previous.replace((x, fx)) {
                if opposite_signs(pfx, fx) {
                    let candidate = RootCandidate {
                        location: (px + x) / 2.0,
                        bracket: (px, x),
                    };
                    trace!(
                        "sign change in [{px}, {x}]: f = {pfx:.3e} -> {fx:.3e}"
                    );
                    return Some(candidate);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.samples - self.index;
        let pairs = if self.previous.is_some() {
            remaining
        } else {
            remaining.saturating_sub(1)
        };
        (0, Some(pairs))
    }
}

impl<F> FusedIterator for Crossings<F> where F: Fn(f64) -> f64 {}

// The product of two tiny values can underflow to zero.
fn opposite_signs(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}
