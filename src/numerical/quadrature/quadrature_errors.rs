use crate::numerical::quadrature::rule_selection::QuadratureRule;
use crate::symbolic::symbolic_errors::{ParseError, SampleEvaluationError};
use thiserror::Error;

pub type QuadratureResult<T> = Result<T, QuadratureError>;

/// Failures of the quadrature engine. The engine never substitutes a default value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error("failed to parse the integrand: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to evaluate the integrand: {0}")]
    Evaluation(#[from] SampleEvaluationError),
    #[error("step size h = {h} must be positive and finite")]
    InvalidStep { h: f64 },
    #[error("interval [{x0}, {xn}] with step h = {h} holds no complete sub-interval")]
    DegenerateInterval { x0: f64, xn: f64, h: f64 },
    #[error("(xn - x0)/h = {ratio} sub-intervals exceeds the limit of {limit}")]
    TooManyIntervals { ratio: f64, limit: usize },
    #[error("{rule} cannot be applied to n = {n} sub-intervals")]
    RuleContract { rule: QuadratureRule, n: usize },
    #[error("x and y must have the same number of values, got {x_len} and {y_len}")]
    InputShape { x_len: usize, y_len: usize },
    #[error("at least 2 points are needed, got {len}")]
    TooFewPoints { len: usize },
    #[error("input value #{index} is not finite ({value})")]
    NonFiniteInput { index: usize, value: f64 },
}
