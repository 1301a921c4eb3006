use crate::symbolic::symbolic_errors::{EvaluationError, ParseError, SampleEvaluationError};
use crate::symbolic::symbolic_expression::Expression;

/// Function of one real variable that the rules can sample.
pub trait Integrand {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError>;

    /// Evaluate at every abscissa in order, stopping at the first failure.
    fn evaluate_many(&self, xs: &[f64]) -> Result<Vec<f64>, SampleEvaluationError> {
        xs.iter()
            .enumerate()
            .map(|(index, &x)| {
                self.evaluate(x)
                    .map_err(|source| SampleEvaluationError { index, x, source })
            })
            .collect()
    }

    /// Get function name for logging and plot captions
    fn name(&self) -> String {
        "f(x)".to_string()
    }
}

/// Simple function wrapper for closures
pub struct ClosureIntegrand<F>
where
    F: Fn(f64) -> Result<f64, EvaluationError>,
{
    func: F,
    name: String,
}

impl<F> ClosureIntegrand<F>
where
    F: Fn(f64) -> Result<f64, EvaluationError>,
{
    pub fn new(func: F, name: &str) -> Self {
        Self {
            func,
            name: name.to_string(),
        }
    }
}

impl<F> Integrand for ClosureIntegrand<F>
where
    F: Fn(f64) -> Result<f64, EvaluationError>,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        (self.func)(x)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Parsed expression of `x`, or of `x` and a constant `y`.
#[derive(Clone, Debug)]
pub struct ExpressionIntegrand {
    expression: Expression,
    fixed: Vec<f64>,
}

impl ExpressionIntegrand {
    /// `y_const = None` binds the expression to `x` alone, `Some(y)` to `x` and `y`.
    pub fn from_text(equation: &str, y_const: Option<f64>) -> Result<Self, ParseError> {
        let expression = match y_const {
            Some(_) => Expression::of_x_and_y(equation)?,
            None => Expression::of_x(equation)?,
        };
        Ok(Self {
            expression,
            fixed: y_const.into_iter().collect(),
        })
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn y_const(&self) -> Option<f64> {
        self.fixed.first().copied()
    }
}

impl Integrand for ExpressionIntegrand {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        match self.y_const() {
            Some(y) => self.expression.evaluate_xy(x, y),
            None => self.expression.evaluate_x(x),
        }
    }

    fn evaluate_many(&self, xs: &[f64]) -> Result<Vec<f64>, SampleEvaluationError> {
        self.expression.evaluate_many(xs, &self.fixed)
    }

    fn name(&self) -> String {
        match self.y_const() {
            Some(y) => format!("{} (y = {})", self.expression, y),
            None => self.expression.to_string(),
        }
    }
}
