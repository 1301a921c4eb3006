/// Fixed step quadrature: the composite trapezoidal rule, Simpson's 1/3 rule and Simpson's 3/8
/// rule over equal sub-intervals, picked automatically from the number of sub-intervals, and the
/// trapezoidal rule over tabulated data with unequal intervals.
///
///# Example
/// ```
/// use RustedQuad::numerical::quadrature::quadrature_api::compute_equal_interval;
/// use RustedQuad::numerical::quadrature::rule_selection::QuadratureRule;
/// // n = (2 - 0)/0.5 = 4 is even and not divisible by 3
/// let outcome = compute_equal_interval("x**2+3*x+2", 0.0, 2.0, 0.5, None).unwrap();
/// assert_eq!(outcome.rule, QuadratureRule::SimpsonOneThird);
/// assert!((outcome.value - 38.0 / 3.0).abs() < 1e-9);
/// println!("{}, the integral value is: {}", outcome.reason(), outcome.value);
/// ```
/// Example#2
/// ```
/// use RustedQuad::numerical::quadrature::quadrature_api::compute_unequal_interval;
/// let value = compute_unequal_interval(&[0.0, 1.0, 1.5, 2.0], &[0.0, 1.0, 2.25, 4.0]).unwrap();
/// // 1*(0+1)/2 + 0.5*(1+2.25)/2 + 0.5*(2.25+4)/2
/// assert!((value - 2.875).abs() < 1e-12);
/// ```
pub mod quadrature_api;
pub mod quadrature_errors;
/// the three composite rules and the unequal interval trapezoidal rule
pub mod quadrature_rules;
/// which rule fits n sub-intervals
pub mod rule_selection;
/// functions the rules can sample: closures and parsed expressions
pub mod integrand;
pub mod sample_grid;
/// integration problems read from a task document, with logging, csv export and plots
pub mod quadrature_task;
#[cfg(test)]
mod quadrature_tests;
