//! Entry points of the quadrature engine: equal-interval integration of a parsed
//! expression (or any [`Integrand`]) with automatic rule selection, and trapezoidal
//! integration of tabulated data with unequal intervals.
use crate::numerical::quadrature::integrand::{ExpressionIntegrand, Integrand};
use crate::numerical::quadrature::quadrature_errors::QuadratureResult;
use crate::numerical::quadrature::quadrature_rules::unequal_interval_trapezoidal;
use crate::numerical::quadrature::rule_selection::{QuadratureRule, select_rule};
use crate::numerical::quadrature::sample_grid::{SampleGrid, interval_count};
use log::{debug, info, warn};

/// Relative mismatch between requested and effective step above which a warning is logged.
const STEP_MISMATCH: f64 = 1e-9;

/// Result of an equal-interval integration together with the sampled grid.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegrationOutcome {
    pub value: f64,
    pub rule: QuadratureRule,
    pub intervals: usize,
    pub grid: SampleGrid,
}

impl IntegrationOutcome {
    /// Why `rule` was chosen for `intervals` sub-intervals.
    pub fn reason(&self) -> String {
        self.rule.reason(self.intervals)
    }

    /// Step actually used; negative for a reversed interval.
    pub fn step(&self) -> f64 {
        self.grid.step()
    }
}

/// Integrates `f` from `x0` to `xn` with step `h`.
///
/// `n = floor(|xn - x0| / h)` sub-intervals are spread evenly over the whole range, so the
/// effective step is `(xn - x0)/n` and may differ from `h` when `h` does not divide the
/// range. The rule is picked by [`select_rule`]. With `xn < x0` the result is the negated
/// integral over `[xn, x0]`.
pub fn integrate_equal_interval<I: Integrand + ?Sized>(
    f: &I,
    x0: f64,
    xn: f64,
    h: f64,
) -> QuadratureResult<IntegrationOutcome> {
    let n = interval_count(x0, xn, h)?;
    let rule = select_rule(n);
    info!("{}", rule.reason(n));
    let effective = (xn - x0) / n as f64;
    if (effective.abs() - h).abs() > STEP_MISMATCH * h {
        warn!(
            "step h = {} does not divide [{}, {}]; using {} sub-intervals of length {}",
            h,
            x0,
            xn,
            n,
            effective.abs()
        );
    }
    let (value, grid) = rule.integrate(f, x0, xn, n)?;
    debug!("integral of {} from {} to {}: {}", f.name(), x0, xn, value);
    Ok(IntegrationOutcome {
        value,
        rule,
        intervals: n,
        grid,
    })
}

/// Parses `equation` and integrates it from `x0` to `xn` with step `h`.
///
/// With `y_const = None` the only variable is `x`; with `Some(y)` the expression may also
/// use `y`, held at that value.
pub fn compute_equal_interval(
    equation: &str,
    x0: f64,
    xn: f64,
    h: f64,
    y_const: Option<f64>,
) -> QuadratureResult<IntegrationOutcome> {
    let integrand = ExpressionIntegrand::from_text(equation, y_const)?;
    integrate_equal_interval(&integrand, x0, xn, h)
}

/// Trapezoidal integral of tabulated `(x, y)` data.
pub fn compute_unequal_interval(x_vals: &[f64], y_vals: &[f64]) -> QuadratureResult<f64> {
    let value = unequal_interval_trapezoidal(x_vals, y_vals)?;
    info!(
        "Using {} over {} points with unequal intervals",
        QuadratureRule::Trapezoidal,
        x_vals.len()
    );
    Ok(value)
}
