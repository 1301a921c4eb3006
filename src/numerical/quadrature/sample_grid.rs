use crate::numerical::quadrature::integrand::Integrand;
use crate::numerical::quadrature::quadrature_errors::{QuadratureError, QuadratureResult};
use crate::symbolic::symbolic_errors::{EvaluationError, SampleEvaluationError};
use log::debug;
use nalgebra::DVector;

/// Upper bound on the number of sub-intervals of an equal-interval grid.
pub const MAX_INTERVALS: usize = 100_000_000;
/// Relative distance to the nearest integer under which (xn - x0)/h counts as that integer,
/// so 0.3/0.1 = 2.9999999999999996 gives 3 sub-intervals and not 2.
const INTEGER_SNAP: f64 = 1e-9;

/// Number of whole steps of length `h` between `x0` and `xn`: `floor(|xn - x0| / h)`.
pub fn interval_count(x0: f64, xn: f64, h: f64) -> QuadratureResult<usize> {
    if !(h.is_finite() && h > 0.0) {
        return Err(QuadratureError::InvalidStep { h });
    }
    check_finite(&[x0, xn])?;
    if x0 == xn {
        return Err(QuadratureError::DegenerateInterval { x0, xn, h });
    }
    let ratio = (xn - x0).abs() / h;
    if !ratio.is_finite() || ratio > MAX_INTERVALS as f64 {
        return Err(QuadratureError::TooManyIntervals {
            ratio,
            limit: MAX_INTERVALS,
        });
    }
    let nearest = ratio.round();
    let n = if (ratio - nearest).abs() <= INTEGER_SNAP * nearest.max(1.0) {
        nearest
    } else {
        ratio.floor()
    } as usize;
    if n == 0 {
        return Err(QuadratureError::DegenerateInterval { x0, xn, h });
    }
    Ok(n)
}

fn check_finite(values: &[f64]) -> QuadratureResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(QuadratureError::NonFiniteInput {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Abscissas with the matching ordinates of the integrand.
///
/// Grids built by [`SampleGrid::sample`] are evenly spaced with `x_0 = a` and `x_n = b`;
/// grids built by [`SampleGrid::from_pairs`] hold caller data with arbitrary spacing.
/// Both constructors guarantee `x.len() == y.len() >= 2`.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    x: DVector<f64>,
    y: DVector<f64>,
}

impl SampleGrid {
    /// `n + 1` evenly spaced points from `a` to `b`, the last one pinned to `b`.
    pub fn linspace(a: f64, b: f64, n: usize) -> DVector<f64> {
        let step = (b - a) / n as f64;
        DVector::from_fn(n + 1, |i, _| if i == n { b } else { a + i as f64 * step })
    }

    /// Samples `f` on `n` equal sub-intervals of `[a, b]`.
    ///
    /// Any failing or non-finite ordinate aborts sampling with the index of the point.
    pub fn sample<I: Integrand + ?Sized>(f: &I, a: f64, b: f64, n: usize) -> QuadratureResult<Self> {
        check_finite(&[a, b])?;
        if n == 0 || a == b {
            return Err(QuadratureError::DegenerateInterval {
                x0: a,
                xn: b,
                h: (b - a) / n as f64,
            });
        }
        if n > MAX_INTERVALS {
            return Err(QuadratureError::TooManyIntervals {
                ratio: n as f64,
                limit: MAX_INTERVALS,
            });
        }
        let x = Self::linspace(a, b, n);
        let values = f.evaluate_many(x.as_slice())?;
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SampleEvaluationError {
                index,
                x: x[index],
                source: EvaluationError::NonFinite {
                    operation: "integrand",
                    value: values[index],
                },
            }
            .into());
        }
        debug!(
            "sampled {} on {} points over [{}, {}]",
            f.name(),
            n + 1,
            a,
            b
        );
        Ok(Self {
            x,
            y: DVector::from_vec(values),
        })
    }

    /// Tabulated data: equal lengths, at least two finite points. Spacing is not checked.
    pub fn from_pairs(x_vals: &[f64], y_vals: &[f64]) -> QuadratureResult<Self> {
        if x_vals.len() != y_vals.len() {
            return Err(QuadratureError::InputShape {
                x_len: x_vals.len(),
                y_len: y_vals.len(),
            });
        }
        if x_vals.len() < 2 {
            return Err(QuadratureError::TooFewPoints { len: x_vals.len() });
        }
        check_finite(x_vals)?;
        check_finite(y_vals)?;
        Ok(Self {
            x: DVector::from_column_slice(x_vals),
            y: DVector::from_column_slice(y_vals),
        })
    }

    pub fn x(&self) -> &DVector<f64> {
        &self.x
    }

    pub fn y(&self) -> &DVector<f64> {
        &self.y
    }

    /// Number of sub-intervals, one less than the number of points.
    pub fn intervals(&self) -> usize {
        self.x.len().saturating_sub(1)
    }

    /// Mean step `(x_n - x_0)/n`; the exact step of an evenly spaced grid.
    pub fn step(&self) -> f64 {
        (self.b() - self.a()) / self.intervals() as f64
    }

    pub fn a(&self) -> f64 {
        self.x[0]
    }

    pub fn b(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// `(x_i, y_i)` pairs, as consumed by the plotting helpers.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::quadrature::integrand::ClosureIntegrand;

    #[test]
    fn test_interval_count() {
        assert_eq!(interval_count(0.0, 2.0, 0.5), Ok(4));
        assert_eq!(interval_count(0.0, 3.0, 1.0), Ok(3));
        assert_eq!(interval_count(0.0, 0.3, 0.1), Ok(3));
        assert_eq!(interval_count(0.0, 1.0, 0.3), Ok(3));
        assert_eq!(interval_count(2.0, 0.0, 0.5), Ok(4));
    }

    #[test]
    fn test_interval_count_errors() {
        assert_eq!(
            interval_count(0.0, 1.0, 0.0),
            Err(QuadratureError::InvalidStep { h: 0.0 })
        );
        assert_eq!(
            interval_count(0.0, 1.0, -0.5),
            Err(QuadratureError::InvalidStep { h: -0.5 })
        );
        assert_eq!(
            interval_count(1.0, 1.0, 0.1),
            Err(QuadratureError::DegenerateInterval {
                x0: 1.0,
                xn: 1.0,
                h: 0.1
            })
        );
        assert_eq!(
            interval_count(0.0, 1.0, 2.0),
            Err(QuadratureError::DegenerateInterval {
                x0: 0.0,
                xn: 1.0,
                h: 2.0
            })
        );
        assert!(matches!(
            interval_count(0.0, 1.0, 1e-300),
            Err(QuadratureError::TooManyIntervals { .. })
        ));
        assert!(matches!(
            interval_count(f64::NAN, 1.0, 0.1),
            Err(QuadratureError::NonFiniteInput { index: 0, .. })
        ));
    }

    #[test]
    fn test_linspace_pins_end_points() {
        let x = SampleGrid::linspace(0.0, 1.0, 3);
        assert_eq!(x.len(), 4);
        assert_eq!(x[0], 0.0);
        assert_eq!(x[3], 1.0);
        let reversed = SampleGrid::linspace(2.0, 0.0, 4);
        assert_eq!(reversed.as_slice(), &[2.0, 1.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_sample_rejects_nan() {
        let f = ClosureIntegrand::new(
            |x: f64| Ok(if x > 0.5 { f64::NAN } else { x }),
            "nan above 0.5",
        );
        let err = SampleGrid::sample(&f, 0.0, 1.0, 4).unwrap_err();
        match err {
            QuadratureError::Evaluation(SampleEvaluationError { index, x, .. }) => {
                assert_eq!(index, 3);
                assert_eq!(x, 0.75);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_sample_degenerate() {
        let f = ClosureIntegrand::new(|x: f64| Ok(x), "x");
        assert!(matches!(
            SampleGrid::sample(&f, 0.0, 1.0, 0),
            Err(QuadratureError::DegenerateInterval { .. })
        ));
        assert!(matches!(
            SampleGrid::sample(&f, 1.0, 1.0, 2),
            Err(QuadratureError::DegenerateInterval { .. })
        ));
    }

    #[test]
    fn test_from_pairs_shape() {
        assert_eq!(
            SampleGrid::from_pairs(&[0.0, 1.0], &[0.0]),
            Err(QuadratureError::InputShape { x_len: 2, y_len: 1 })
        );
        assert_eq!(
            SampleGrid::from_pairs(&[0.0], &[0.0]),
            Err(QuadratureError::TooFewPoints { len: 1 })
        );
        let grid = SampleGrid::from_pairs(&[0.0, 1.0, 1.5], &[0.0, 1.0, 2.25]).unwrap();
        assert_eq!(grid.intervals(), 2);
        assert_eq!(grid.x().len(), grid.y().len());
        assert_eq!((grid.a(), grid.b()), (0.0, 1.5));
        assert_eq!(grid.points()[2], (1.5, 2.25));
    }
}
