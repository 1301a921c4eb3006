//! Parsed expression bound to a fixed, ordered list of variables.
//!
//! The integrand of an equal-interval problem is either a function of `x` alone or of
//! `x` and `y` with `y` held constant; both are the same [`Expression`] with arity 1 or 2.
use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::{EvaluationError, ParseError, SampleEvaluationError};
use crate::symbolic::symbolic_lambdify::Lambda;
use log::debug;
use std::fmt;

#[derive(Clone, Debug)]
pub struct Expression {
    text: String,
    expr: Expr,
    variables: Vec<String>,
    compiled: Lambda,
}

impl Expression {
    /// Parses `text` and binds it to `variables`, in that argument order.
    ///
    /// Fails if the text is not a valid expression, uses a function or a variable that is
    /// not known, or if `variables` repeats a name.
    pub fn parse(text: &str, variables: &[&str]) -> Result<Self, ParseError> {
        for (i, name) in variables.iter().enumerate() {
            if variables[..i].contains(name) {
                return Err(ParseError::DuplicateVariable {
                    name: name.to_string(),
                });
            }
        }
        let expr = parse_expression_func(text)?;
        let compiled = expr.compile(variables)?;
        debug!(
            "parsed '{}' as {}, free variables {:?}, declared {:?}",
            text.trim(),
            expr,
            expr.all_arguments_are_variables(),
            variables
        );
        Ok(Self {
            text: text.trim().to_string(),
            expr,
            variables: variables.iter().map(|v| v.to_string()).collect(),
            compiled,
        })
    }

    /// Function of `x` only.
    pub fn of_x(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, &["x"])
    }

    /// Function of `x` and `y`; `y` is expected to be held constant by the caller.
    pub fn of_x_and_y(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, &["x", "y"])
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    /// Evaluates at `args`, given in declaration order.
    ///
    /// The result is always a finite real; NaN or infinite arguments are rejected even when
    /// the expression does not use them.
    pub fn evaluate(&self, args: &[f64]) -> Result<f64, EvaluationError> {
        if args.len() != self.arity() {
            return Err(EvaluationError::ArgumentCount {
                expected: self.arity(),
                got: args.len(),
            });
        }
        if let Some(&value) = args.iter().find(|v| !v.is_finite()) {
            return Err(EvaluationError::NonFinite {
                operation: "argument",
                value,
            });
        }
        self.compiled.eval(args)
    }

    pub fn evaluate_x(&self, x: f64) -> Result<f64, EvaluationError> {
        self.evaluate(&[x])
    }

    pub fn evaluate_xy(&self, x: f64, y: f64) -> Result<f64, EvaluationError> {
        self.evaluate(&[x, y])
    }

    /// Evaluates at every abscissa of `xs`, with the remaining arguments fixed to `fixed`.
    ///
    /// Points are evaluated in order with the same operations as [`Expression::evaluate`],
    /// so each value is bit-identical to a pointwise call. Stops at the first failure.
    pub fn evaluate_many(
        &self,
        xs: &[f64],
        fixed: &[f64],
    ) -> Result<Vec<f64>, SampleEvaluationError> {
        let mut args = Vec::with_capacity(1 + fixed.len());
        args.push(0.0);
        args.extend_from_slice(fixed);
        let mut values = Vec::with_capacity(xs.len());
        for (index, &x) in xs.iter().enumerate() {
            args[0] = x;
            let value = self
                .evaluate(&args)
                .map_err(|source| SampleEvaluationError { index, x, source })?;
            values.push(value);
        }
        Ok(values)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "f({}) = {}", self.variables.join(", "), self.text)
    }
}
