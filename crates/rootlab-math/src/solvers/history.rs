//! Iteration histories and the error sequences derived from them.

/// The ordered iterates `x_0, x_1, ..., x_n` produced by one solver run.
///
/// The first entry is always the start value. Only the solver loop can
/// append to a record; once a run terminates the record is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    iterates: Vec<f64>,
}

impl IterationRecord {
    /// Creates a record holding only the start value.
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self {
            iterates: vec![start],
        }
    }

    pub(crate) fn push(&mut self, x: f64) {
        self.iterates.push(x);
    }

    /// The start value `x_0`.
    pub fn start(&self) -> f64 {
        self.iterates[0]
    }

    /// The most recent iterate.
    pub fn last(&self) -> f64 {
        self.iterates[self.iterates.len() - 1]
    }

    /// Number of iterates, including the start value.
    pub fn len(&self) -> usize {
        self.iterates.len()
    }

    /// A record is never empty; it always contains the start value.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The iterates as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.iterates
    }

    /// Iterates over the iterates in order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.iterates.iter()
    }

    /// Absolute successive differences `|x_{i+1} - x_i|`.
    pub fn error_sequence(&self) -> ErrorSequence {
        ErrorSequence {
            errors: self
                .iterates
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).abs())
                .collect(),
        }
    }

    /// Per-iteration trace rows `(n, x_n, |x_n - x_{n-1}|)`, starting at `n = 1`.
    pub fn steps(&self) -> impl Iterator<Item = IterationStep> + '_ {
        self.iterates
            .windows(2)
            .zip(1u32..)
            .map(|(pair, n)| IterationStep {
                n,
                x: pair[1],
                delta: (pair[1] - pair[0]).abs(),
            })
    }
}

impl<'a> IntoIterator for &'a IterationRecord {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One row of a verbose iteration trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStep {
    /// Iteration number (1-based).
    pub n: u32,
    /// Iterate produced by this step.
    pub x: f64,
    /// Step size `|x_n - x_{n-1}|`.
    pub delta: f64,
}

/// Absolute successive differences of an [`IterationRecord`].
///
/// Used as the error proxy when comparing convergence rates: for a linearly
/// convergent method consecutive errors shrink by a roughly constant factor,
/// for a quadratically convergent one each error is roughly the square of the
/// previous.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorSequence {
    errors: Vec<f64>,
}

impl ErrorSequence {
    /// Number of errors (`history.len() - 1`).
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if the run took no steps.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The errors as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.errors
    }

    /// Iterates over the errors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.errors.iter()
    }

    /// Empirical convergence-order estimates.
    ///
    /// For each triple of consecutive errors `e_{i-1}, e_i, e_{i+1}` that are
    /// all positive and finite, yields `ln(e_{i+1}/e_i) / ln(e_i/e_{i-1})`.
    /// Triples with equal neighbouring errors are skipped.
    pub fn order_estimates(&self) -> Vec<f64> {
        self.errors
            .windows(3)
            .filter(|w| w.iter().all(|e| usable(*e)))
            .filter_map(|w| {
                let denom = (w[1] / w[0]).ln();
                if denom == 0.0 {
                    return None;
                }
                Some((w[2] / w[1]).ln() / denom)
            })
            .collect()
    }

    /// The last order estimate, i.e. the one closest to the asymptotic regime.
    pub fn estimated_order(&self) -> Option<f64> {
        self.order_estimates().last().copied()
    }

    /// Least-squares slope of `ln e_{i+1}` against `ln e_i`.
    ///
    /// Close to 1 for linear and close to 2 for quadratic convergence.
    /// Pairs containing a zero or non-finite error are ignored; returns `None`
    /// when fewer than two pairs remain or all abscissae coincide.
    pub fn log_log_slope(&self) -> Option<f64> {
        let points: Vec<(f64, f64)> = self
            .errors
            .windows(2)
            .filter(|w| usable(w[0]) && usable(w[1]))
            .map(|w| (w[0].ln(), w[1].ln()))
            .collect();

        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
        let sxy: f64 = points
            .iter()
            .map(|p| (p.0 - mean_x) * (p.1 - mean_y))
            .sum();

        if sxx == 0.0 {
            return None;
        }
        Some(sxy / sxx)
    }
}

impl<'a> IntoIterator for &'a ErrorSequence {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn usable(e: f64) -> bool {
    e.is_finite() && e > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(values: &[f64]) -> IterationRecord {
        let mut record = IterationRecord::new(values[0]);
        for &x in &values[1..] {
            record.push(x);
        }
        record
    }

    #[test]
    fn test_new_record_holds_start() {
        let record = IterationRecord::new(0.5);
        assert_eq!(record.len(), 1);
        assert_eq!(record.start(), 0.5);
        assert_eq!(record.last(), 0.5);
        assert!(record.error_sequence().is_empty());
        assert_eq!(record.steps().count(), 0);
    }

    #[test]
    fn test_error_sequence_length() {
        let record = record(&[1.0, 0.5, 0.75, 0.625]);
        let errors = record.error_sequence();

        assert_eq!(errors.len(), record.len() - 1);
        assert_eq!(errors.as_slice(), &[0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_steps_are_one_based() {
        let record = record(&[0.0, 1.0, 1.5]);
        let steps: Vec<_> = record.steps().collect();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].n, 1);
        assert_eq!(steps[1].x, 1.5);
        assert_relative_eq!(steps[1].delta, 0.5);
    }

    #[test]
    fn test_linear_order_estimate() {
        // Errors halve each step: e_{n+1} = 0.5 e_n.
        let record = record(&[0.0, 1.0, 1.5, 1.75, 1.875, 1.9375]);
        let errors = record.error_sequence();

        let order = errors.estimated_order().unwrap();
        assert_relative_eq!(order, 1.0, epsilon = 1e-9);
        assert_relative_eq!(errors.log_log_slope().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_quadratic_order_estimate() {
        // Errors 1e-1, 1e-2, 1e-4, 1e-8: each the square of the previous.
        let values = [0.0, 1e-1, 1e-1 + 1e-2, 1e-1 + 1e-2 + 1e-4, 1e-1 + 1e-2 + 1e-4 + 1e-8];
        let errors = record(&values).error_sequence();

        let order = errors.estimated_order().unwrap();
        assert!((order - 2.0).abs() < 1e-3, "order = {order}");
    }

    #[test]
    fn test_zero_errors_are_skipped() {
        let errors = record(&[0.0, 1.0, 1.0, 1.0]).error_sequence();

        assert!(errors.order_estimates().is_empty());
        assert!(errors.log_log_slope().is_none());
    }
}
