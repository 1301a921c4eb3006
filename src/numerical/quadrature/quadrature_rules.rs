//! Composite trapezoidal, Simpson's 1/3 and Simpson's 3/8 rules over equal sub-intervals,
//! plus the trapezoidal rule for tabulated data with unequal intervals.
//!
//! With `h = (b - a)/n` and `y_i = f(a + i*h)`:
//! - trapezoidal:  `h * ((y_0 + y_n)/2 + sum_{0<i<n} y_i)`, any `n >= 1`
//! - Simpson 1/3:  `h/3 * (y_0 + y_n + 4*sum_{i odd} y_i + 2*sum_{i even, 0<i<n} y_i)`, even `n >= 2`
//! - Simpson 3/8:  `3h/8 * (y_0 + y_n + 3*sum_{i%3 != 0} y_i + 2*sum_{i%3 == 0, 0<i<n} y_i)`, `n % 3 == 0`
use crate::numerical::quadrature::integrand::Integrand;
use crate::numerical::quadrature::quadrature_errors::{QuadratureError, QuadratureResult};
use crate::numerical::quadrature::rule_selection::QuadratureRule;
use crate::numerical::quadrature::sample_grid::SampleGrid;
use itertools::Itertools;
use log::debug;

fn trapezoidal_sum(y: &[f64], h: f64) -> f64 {
    let n = y.len() - 1;
    let interior: f64 = y[1..n].iter().sum();
    h * ((y[0] + y[n]) / 2.0 + interior)
}

fn simpson_one_third_sum(y: &[f64], h: f64) -> f64 {
    let n = y.len() - 1;
    let odd: f64 = y[1..n].iter().step_by(2).sum();
    let even: f64 = y[2..n].iter().step_by(2).sum();
    h / 3.0 * (y[0] + y[n] + 4.0 * odd + 2.0 * even)
}

fn simpson_three_eighth_sum(y: &[f64], h: f64) -> f64 {
    let n = y.len() - 1;
    let (mut inside_triples, mut triple_ends) = (0.0, 0.0);
    for (i, value) in y.iter().enumerate().take(n).skip(1) {
        if i % 3 == 0 {
            triple_ends += value;
        } else {
            inside_triples += value;
        }
    }
    3.0 * h / 8.0 * (y[0] + y[n] + 3.0 * inside_triples + 2.0 * triple_ends)
}

impl QuadratureRule {
    /// Applies the rule to an evenly spaced grid.
    ///
    /// Fails with [`QuadratureError::RuleContract`] if the grid's interval count does not
    /// fit the rule.
    pub fn apply(&self, grid: &SampleGrid) -> QuadratureResult<f64> {
        let n = grid.intervals();
        if !self.accepts(n) {
            return Err(QuadratureError::RuleContract { rule: *self, n });
        }
        let y = grid.y().as_slice();
        let h = grid.step();
        let value = match self {
            QuadratureRule::Trapezoidal => trapezoidal_sum(y, h),
            QuadratureRule::SimpsonOneThird => simpson_one_third_sum(y, h),
            QuadratureRule::SimpsonThreeEighth => simpson_three_eighth_sum(y, h),
        };
        Ok(value)
    }

    /// Samples `f` on `n` equal sub-intervals of `[a, b]` and applies the rule.
    ///
    /// The contract is checked before any evaluation. Returns the estimate together with
    /// the sampled grid.
    pub fn integrate<I: Integrand + ?Sized>(
        &self,
        f: &I,
        a: f64,
        b: f64,
        n: usize,
    ) -> QuadratureResult<(f64, SampleGrid)> {
        if n > 0 && !self.accepts(n) {
            return Err(QuadratureError::RuleContract { rule: *self, n });
        }
        let grid = SampleGrid::sample(f, a, b, n)?;
        let value = self.apply(&grid)?;
        debug!("{} over [{}, {}] with n = {}: {}", self, a, b, n, value);
        Ok((value, grid))
    }
}

/// Composite trapezoidal rule, `n >= 1`.
pub fn trapezoidal<I: Integrand + ?Sized>(f: &I, a: f64, b: f64, n: usize) -> QuadratureResult<f64> {
    QuadratureRule::Trapezoidal
        .integrate(f, a, b, n)
        .map(|(value, _)| value)
}

/// Composite Simpson's 1/3 rule, even `n >= 2`.
pub fn simpson_one_third<I: Integrand + ?Sized>(
    f: &I,
    a: f64,
    b: f64,
    n: usize,
) -> QuadratureResult<f64> {
    QuadratureRule::SimpsonOneThird
        .integrate(f, a, b, n)
        .map(|(value, _)| value)
}

/// Composite Simpson's 3/8 rule, `n` a positive multiple of 3.
pub fn simpson_three_eighth<I: Integrand + ?Sized>(
    f: &I,
    a: f64,
    b: f64,
    n: usize,
) -> QuadratureResult<f64> {
    QuadratureRule::SimpsonThreeEighth
        .integrate(f, a, b, n)
        .map(|(value, _)| value)
}

/// Trapezoidal sum over consecutive points of a grid with arbitrary spacing.
pub fn unequal_interval_sum(grid: &SampleGrid) -> f64 {
    grid.x()
        .iter()
        .zip(grid.y().iter())
        .tuple_windows()
        .map(|((x0, y0), (x1, y1))| (x1 - x0) * (y0 + y1) / 2.0)
        .sum()
}

/// `sum (x_{i+1} - x_i) * (y_i + y_{i+1}) / 2` over tabulated data.
///
/// Always trapezoidal: the higher order rules need uniform spacing. The x values are
/// expected to be increasing but this is not checked.
pub fn unequal_interval_trapezoidal(x_vals: &[f64], y_vals: &[f64]) -> QuadratureResult<f64> {
    let grid = SampleGrid::from_pairs(x_vals, y_vals)?;
    Ok(unequal_interval_sum(&grid))
}
