//! Reference root-finding problems.
//!
//! A [`FunctionPair`] bundles a function `f`, its derivative `f'`, a
//! fixed-point reformulation `g` (with `g(x) = x` exactly where `f(x) = 0`)
//! and its derivative `g'`, together with the interval the problem lives on.
//! The engine never derives any of these; implementors supply all four.

use std::f64::consts::PI;

/// A scalar root-finding problem with a fixed-point reformulation.
pub trait FunctionPair {
    /// Short display name.
    fn name(&self) -> &'static str;

    /// The function whose zeros are sought.
    fn f(&self, x: f64) -> f64;

    /// Derivative of [`f`](Self::f).
    fn df(&self, x: f64) -> f64;

    /// Fixed-point map whose fixed points are the zeros of `f`.
    fn g(&self, x: f64) -> f64;

    /// Derivative of [`g`](Self::g).
    fn dg(&self, x: f64) -> f64;

    /// The natural interval `(lower, upper)` of the problem.
    fn domain(&self) -> (f64, f64);
}

/// Cubic polynomial with a sine term on `[0, L]`.
///
/// `f(x) = (8/3)(x/L) - 3(x/L)^2 + (1/3)(x/L)^3 - (2/3) sin(pi x / L)`
///
/// Solving the linear term for `x` gives the fixed-point map
/// `g(x) = (3L/8) (3(x/L)^2 - (1/3)(x/L)^3 + (2/3) sin(pi x / L))`.
///
/// For `L = 1` the zeros are `0`, about `0.2987`, about `0.8424` and `1`.
/// `g` contracts near `0` and `0.8424` but expands near `0.2987`, so only
/// Newton's method reaches the latter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSine {
    /// Interval length `L`.
    pub length: f64,
}

impl CubicSine {
    /// Creates the problem for interval length `length`.
    #[must_use]
    pub fn new(length: f64) -> Self {
        Self { length }
    }
}

impl Default for CubicSine {
    fn default() -> Self {
        Self { length: 1.0 }
    }
}

impl FunctionPair for CubicSine {
    fn name(&self) -> &'static str {
        "cubic-sine"
    }

    fn f(&self, x: f64) -> f64 {
        let l = self.length;
        let u = x / l;
        (8.0 / 3.0) * u - 3.0 * u.powi(2) + u.powi(3) / 3.0 - (2.0 / 3.0) * (PI * u).sin()
    }

    fn df(&self, x: f64) -> f64 {
        let l = self.length;
        let u = x / l;
        ((8.0 / 3.0) - 6.0 * u + u.powi(2) - (2.0 / 3.0) * PI * (PI * u).cos()) / l
    }

    fn g(&self, x: f64) -> f64 {
        let l = self.length;
        let u = x / l;
        (3.0 * l / 8.0) * (3.0 * u.powi(2) - u.powi(3) / 3.0 + (2.0 / 3.0) * (PI * u).sin())
    }

    fn dg(&self, x: f64) -> f64 {
        let u = x / self.length;
        (3.0 / 8.0) * (6.0 * u - u.powi(2) + (2.0 / 3.0) * PI * (PI * u).cos())
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.length)
    }
}

/// `f(x) = x - cos(x)` with `g(x) = cos(x)`, on `[0, 1]`.
///
/// The single zero is the Dottie number, about `0.7390851332`, where
/// `|g'| = sin(x*)`, about `0.67`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CosineFixedPoint;

impl FunctionPair for CosineFixedPoint {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn f(&self, x: f64) -> f64 {
        x - x.cos()
    }

    fn df(&self, x: f64) -> f64 {
        1.0 + x.sin()
    }

    fn g(&self, x: f64) -> f64 {
        x.cos()
    }

    fn dg(&self, x: f64) -> f64 {
        -x.sin()
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// `f(x) = x^2 - c` with `g(x) = x - (x^2 - c)`.
///
/// For `c > 0` the zeros are `+-sqrt(c)`; `|g'(x)| = |1 - 2x|` makes the
/// positive zero attracting for `c < 1` and the negative one repelling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    /// The constant `c`.
    pub constant: f64,
}

impl Quadratic {
    /// Creates the problem `x^2 - constant`.
    #[must_use]
    pub fn new(constant: f64) -> Self {
        Self { constant }
    }
}

impl Default for Quadratic {
    fn default() -> Self {
        Self { constant: 0.25 }
    }
}

impl FunctionPair for Quadratic {
    fn name(&self) -> &'static str {
        "quadratic"
    }

    fn f(&self, x: f64) -> f64 {
        x * x - self.constant
    }

    fn df(&self, x: f64) -> f64 {
        2.0 * x
    }

    fn g(&self, x: f64) -> f64 {
        x - (x * x - self.constant)
    }

    fn dg(&self, x: f64) -> f64 {
        1.0 - 2.0 * x
    }

    fn domain(&self) -> (f64, f64) {
        let half_width = 1.0 + self.constant.abs().sqrt();
        (-half_width, half_width)
    }
}

impl<P: FunctionPair + ?Sized> FunctionPair for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn f(&self, x: f64) -> f64 {
        (**self).f(x)
    }

    fn df(&self, x: f64) -> f64 {
        (**self).df(x)
    }

    fn g(&self, x: f64) -> f64 {
        (**self).g(x)
    }

    fn dg(&self, x: f64) -> f64 {
        (**self).dg(x)
    }

    fn domain(&self) -> (f64, f64) {
        (**self).domain()
    }
}

impl<P: FunctionPair + ?Sized> FunctionPair for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn f(&self, x: f64) -> f64 {
        (**self).f(x)
    }

    fn df(&self, x: f64) -> f64 {
        (**self).df(x)
    }

    fn g(&self, x: f64) -> f64 {
        (**self).g(x)
    }

    fn dg(&self, x: f64) -> f64 {
        (**self).dg(x)
    }

    fn domain(&self) -> (f64, f64) {
        (**self).domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Central difference, for checking hand-written derivatives.
    fn numeric_derivative(f: impl Fn(f64) -> f64, x: f64) -> f64 {
        let h = 1e-6;
        (f(x + h) - f(x - h)) / (2.0 * h)
    }

    fn check_pair(problem: &dyn FunctionPair) {
        let (lower, upper) = problem.domain();
        for i in 0..=10 {
            let x = lower + (upper - lower) * f64::from(i) / 10.0;
            assert_relative_eq!(
                problem.df(x),
                numeric_derivative(|t| problem.f(t), x),
                epsilon = 1e-6
            );
            assert_relative_eq!(
                problem.dg(x),
                numeric_derivative(|t| problem.g(t), x),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        check_pair(&CubicSine::default());
        check_pair(&CubicSine::new(2.5));
        check_pair(&CosineFixedPoint);
        check_pair(&Quadratic::new(0.25));
    }

    #[test]
    fn test_fixed_points_are_zeros() {
        let problems: [&dyn FunctionPair; 3] =
            [&CubicSine::default(), &CosineFixedPoint, &Quadratic::default()];

        for problem in problems {
            let (lower, upper) = problem.domain();
            for i in 0..=20 {
                let x = lower + (upper - lower) * f64::from(i) / 20.0;
                // g(x) - x vanishes exactly where f does.
                let gap = problem.g(x) - x;
                assert!(
                    (gap.abs() < 1e-12) == (problem.f(x).abs() < 1e-12),
                    "{} at x = {x}",
                    problem.name()
                );
            }
        }
    }

    #[test]
    fn test_cubic_sine_endpoint_zeros() {
        let problem = CubicSine::default();
        assert_relative_eq!(problem.f(0.0), 0.0);
        assert_relative_eq!(problem.f(1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_sine_scales_with_length() {
        let unit = CubicSine::default();
        let wide = CubicSine::new(2.0);

        assert_relative_eq!(wide.f(0.6), unit.f(0.3), epsilon = 1e-12);
        assert_relative_eq!(wide.g(0.6), 2.0 * unit.g(0.3), epsilon = 1e-12);
        assert_eq!(wide.domain(), (0.0, 2.0));
    }

    #[test]
    fn test_quadratic_domain_brackets_roots() {
        let problem = Quadratic::new(4.0);
        let (lower, upper) = problem.domain();
        assert!(lower < -2.0 && upper > 2.0);
    }

    #[test]
    fn test_boxed_problem() {
        let boxed: Box<dyn FunctionPair> = Box::new(CosineFixedPoint);
        assert_eq!(boxed.name(), "cosine");
        assert_relative_eq!(boxed.g(0.0), 1.0);
    }
}
