//! Contraction analysis for fixed-point maps.
//!
//! Fixed-point iteration `x_{n+1} = g(x_n)` converges locally to `x*` when
//! `|g'(x)| < 1` near `x*`. The helpers here sample `|g'|` over an interval
//! so a caller can see where a start value is worth trying.

use crate::error::MathResult;
use crate::scan::SampleGrid;

/// A run of sample points where `|g'(x)| < 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractionRegion {
    /// First sample point of the run.
    pub lower: f64,
    /// Last sample point of the run.
    pub upper: f64,
    /// Largest sampled `|g'(x)|` within the run.
    pub max_rate: f64,
}

impl ContractionRegion {
    /// Returns `true` if `x` lies inside the region.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Width of the region.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Local contraction rate `|g'(x)|`.
pub fn contraction_rate<DG>(dg: DG, x: f64) -> f64
where
    DG: Fn(f64) -> f64,
{
    dg(x).abs()
}

/// Returns `true` if `|g'(x)| < 1`.
pub fn is_contractive_at<DG>(dg: DG, x: f64) -> bool
where
    DG: Fn(f64) -> f64,
{
    contraction_rate(dg, x) < 1.0
}

/// Finds the sub-intervals of `[lower, upper]` where `|g'(x)| < 1`.
///
/// Samples `dg` at `samples` evenly spaced points and groups consecutive
/// contractive samples into regions. The region bounds are sample points, so
/// the true boundary lies within one sample spacing of each reported bound.
/// Non-finite derivative values count as non-contractive.
///
/// # Example
///
/// ```rust
/// use rootlab_math::contraction::contraction_regions;
///
/// // g(x) = x^2 contracts on (-1/2, 1/2).
/// let regions = contraction_regions(|x: f64| 2.0 * x, -1.0, 1.0, 201).unwrap();
///
/// assert_eq!(regions.len(), 1);
/// assert!((regions[0].lower + 0.49).abs() < 1e-9);
/// assert!((regions[0].upper - 0.49).abs() < 1e-9);
/// ```
pub fn contraction_regions<DG>(
    dg: DG,
    lower: f64,
    upper: f64,
    samples: usize,
) -> MathResult<Vec<ContractionRegion>>
where
    DG: Fn(f64) -> f64,
{
    let grid = SampleGrid::new(lower, upper, samples)?;
    let mut regions = Vec::new();
    let mut current: Option<ContractionRegion> = None;

    for x in grid.points() {
        let rate = contraction_rate(&dg, x);

        if rate < 1.0 {
            match current.as_mut() {
                Some(region) => {
                    region.upper = x;
                    region.max_rate = region.max_rate.max(rate);
                }
                None => {
                    current = Some(ContractionRegion {
                        lower: x,
                        upper: x,
                        max_rate: rate,
                    });
                }
            }
        } else if let Some(region) = current.take() {
            regions.push(region);
        }
    }

    regions.extend(current);
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::{CubicSine, FunctionPair};
    use approx::assert_relative_eq;

    #[test]
    fn test_rate() {
        assert_relative_eq!(contraction_rate(|x: f64| -3.0 * x, 0.5), 1.5);
        assert!(is_contractive_at(|x: f64| x.sin(), 1.0));
        assert!(!is_contractive_at(|_x: f64| 1.0, 0.0));
    }

    #[test]
    fn test_whole_interval_contracts() {
        let regions = contraction_regions(|x: f64| -x.sin(), 0.0, 1.0, 50).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].lower, 0.0);
        assert_eq!(regions[0].upper, 1.0);
        assert_relative_eq!(regions[0].max_rate, 1.0f64.sin());
    }

    #[test]
    fn test_no_contraction() {
        let regions = contraction_regions(|_x: f64| 2.0, 0.0, 1.0, 50).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_nan_breaks_region() {
        let dg = |x: f64| if (0.45..0.55).contains(&x) { f64::NAN } else { 0.0 };
        let regions = contraction_regions(dg, 0.0, 1.0, 11).unwrap();

        assert_eq!(regions.len(), 2);
        assert_relative_eq!(regions[0].upper, 0.4, epsilon = 1e-12);
        assert_relative_eq!(regions[1].lower, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample_region() {
        // |g'| dips below one only at x = 0.
        let regions = contraction_regions(|x: f64| 0.5 + x.abs() * 10.0, -1.0, 1.0, 11).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].lower, regions[0].upper);
        assert_relative_eq!(regions[0].width(), 0.0);
    }

    #[test]
    fn test_cubic_sine_regions() {
        // The map contracts near the roots at 0 and about 0.842, but not near 0.299.
        let problem = CubicSine::default();
        let (lower, upper) = problem.domain();
        let regions = contraction_regions(|x| problem.dg(x), lower, upper, 1000).unwrap();

        assert!(!regions.is_empty());
        assert!(regions[0].contains(0.0));
        assert!(regions.iter().any(|r| r.contains(0.842)));
        assert!(!regions.iter().any(|r| r.contains(0.299)));
    }

    #[test]
    fn test_invalid_window() {
        assert!(contraction_regions(|x: f64| x, 1.0, 0.0, 10).is_err());
        assert!(contraction_regions(|x: f64| x, 0.0, 1.0, 0).is_err());
        assert!(contraction_regions(|_x: f64| 0.5, -1e308, 1e308, 3).is_err());
    }
}
