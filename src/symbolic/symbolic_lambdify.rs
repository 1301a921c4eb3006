use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::{EvaluationError, ParseError};
use std::f64::consts::PI;

/// Evaluation tree with variables resolved to argument positions.
///
/// Produced by [`Expr::compile`]; every node checks its own domain, so a failing
/// evaluation reports the first operation that left the real line.
#[derive(Clone, Debug)]
pub enum Lambda {
    Var(usize),
    Const(f64),
    Add(Box<Lambda>, Box<Lambda>),
    Sub(Box<Lambda>, Box<Lambda>),
    Mul(Box<Lambda>, Box<Lambda>),
    Div(Box<Lambda>, Box<Lambda>),
    Pow(Box<Lambda>, Box<Lambda>),
    Exp(Box<Lambda>),
    Ln(Box<Lambda>),
    Abs(Box<Lambda>),
    Sin(Box<Lambda>),
    Cos(Box<Lambda>),
    Tg(Box<Lambda>),
    Ctg(Box<Lambda>),
    ArcSin(Box<Lambda>),
    ArcCos(Box<Lambda>),
    ArcTg(Box<Lambda>),
    ArcCtg(Box<Lambda>),
}

impl Expr {
    /// Resolves every variable to its position in `vars`.
    ///
    /// Fails with [`ParseError::UnknownSymbol`] if the expression uses a name that is not
    /// declared in `vars`.
    pub fn compile(&self, vars: &[&str]) -> Result<Lambda, ParseError> {
        let lambda = match self {
            Expr::Var(name) => {
                let idx = vars.iter().position(|&v| v == name).ok_or_else(|| {
                    ParseError::UnknownSymbol {
                        name: name.clone(),
                        allowed: vars.iter().map(|v| v.to_string()).collect(),
                    }
                })?;
                Lambda::Var(idx)
            }
            Expr::Const(v) => Lambda::Const(*v),
            Expr::Add(a, b) => Lambda::Add(a.compile_boxed(vars)?, b.compile_boxed(vars)?),
            Expr::Sub(a, b) => Lambda::Sub(a.compile_boxed(vars)?, b.compile_boxed(vars)?),
            Expr::Mul(a, b) => Lambda::Mul(a.compile_boxed(vars)?, b.compile_boxed(vars)?),
            Expr::Div(a, b) => Lambda::Div(a.compile_boxed(vars)?, b.compile_boxed(vars)?),
            Expr::Pow(a, b) => Lambda::Pow(a.compile_boxed(vars)?, b.compile_boxed(vars)?),
            Expr::Exp(e) => Lambda::Exp(e.compile_boxed(vars)?),
            Expr::Ln(e) => Lambda::Ln(e.compile_boxed(vars)?),
            Expr::Abs(e) => Lambda::Abs(e.compile_boxed(vars)?),
            Expr::sin(e) => Lambda::Sin(e.compile_boxed(vars)?),
            Expr::cos(e) => Lambda::Cos(e.compile_boxed(vars)?),
            Expr::tg(e) => Lambda::Tg(e.compile_boxed(vars)?),
            Expr::ctg(e) => Lambda::Ctg(e.compile_boxed(vars)?),
            Expr::arcsin(e) => Lambda::ArcSin(e.compile_boxed(vars)?),
            Expr::arccos(e) => Lambda::ArcCos(e.compile_boxed(vars)?),
            Expr::arctg(e) => Lambda::ArcTg(e.compile_boxed(vars)?),
            Expr::arcctg(e) => Lambda::ArcCtg(e.compile_boxed(vars)?),
        };
        Ok(lambda)
    }

    fn compile_boxed(&self, vars: &[&str]) -> Result<Box<Lambda>, ParseError> {
        self.compile(vars).map(Box::new)
    }

    /// Converts the expression into a thread safe closure over the arguments in `vars` order.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = parse_expression_func("x*y")?.lambdify_checked(&["x", "y"])?;
    /// assert_eq!(f(&[2.0, 3.0]), Ok(6.0));
    /// ```
    pub fn lambdify_checked(
        &self,
        vars: &[&str],
    ) -> Result<Box<dyn Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync>, ParseError>
    {
        let compiled = self.compile(vars)?;
        Ok(Box::new(compiled.as_closure()))
    }
}

fn finite(operation: &'static str, value: f64) -> Result<f64, EvaluationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::NonFinite { operation, value })
    }
}

fn checked_pow(base: f64, exponent: f64) -> Result<f64, EvaluationError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvaluationError::ComplexResult { base, exponent });
    }
    finite("power", base.powf(exponent))
}

impl Lambda {
    /// Evaluates the tree; `args` are indexed by the positions resolved in `compile`.
    pub fn eval(&self, args: &[f64]) -> Result<f64, EvaluationError> {
        match self {
            Lambda::Var(i) => {
                let value = args.get(*i).copied().ok_or(EvaluationError::ArgumentCount {
                    expected: *i + 1,
                    got: args.len(),
                })?;
                finite("argument", value)
            }
            Lambda::Const(v) => finite("constant", *v),
            Lambda::Add(a, b) => finite("addition", a.eval(args)? + b.eval(args)?),
            Lambda::Sub(a, b) => finite("subtraction", a.eval(args)? - b.eval(args)?),
            Lambda::Mul(a, b) => finite("multiplication", a.eval(args)? * b.eval(args)?),
            Lambda::Div(a, b) => {
                let numerator = a.eval(args)?;
                let denominator = b.eval(args)?;
                if denominator == 0.0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                finite("division", numerator / denominator)
            }
            Lambda::Pow(a, b) => checked_pow(a.eval(args)?, b.eval(args)?),
            Lambda::Exp(e) => finite("exp", e.eval(args)?.exp()),
            Lambda::Ln(e) => {
                let argument = e.eval(args)?;
                if argument <= 0.0 {
                    return Err(EvaluationError::Domain {
                        function: "ln",
                        argument,
                    });
                }
                finite("ln", argument.ln())
            }
            Lambda::Abs(e) => finite("abs", e.eval(args)?.abs()),
            Lambda::Sin(e) => finite("sin", e.eval(args)?.sin()),
            Lambda::Cos(e) => finite("cos", e.eval(args)?.cos()),
            Lambda::Tg(e) => finite("tg", e.eval(args)?.tan()),
            Lambda::Ctg(e) => {
                let tangent = e.eval(args)?.tan();
                if tangent == 0.0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                finite("ctg", 1.0 / tangent)
            }
            Lambda::ArcSin(e) => {
                let argument = e.eval(args)?;
                if !(-1.0..=1.0).contains(&argument) {
                    return Err(EvaluationError::Domain {
                        function: "arcsin",
                        argument,
                    });
                }
                Ok(argument.asin())
            }
            Lambda::ArcCos(e) => {
                let argument = e.eval(args)?;
                if !(-1.0..=1.0).contains(&argument) {
                    return Err(EvaluationError::Domain {
                        function: "arccos",
                        argument,
                    });
                }
                Ok(argument.acos())
            }
            Lambda::ArcTg(e) => finite("arctg", e.eval(args)?.atan()),
            Lambda::ArcCtg(e) => finite("arcctg", (PI / 2.0) - e.eval(args)?.atan()),
        }
    }

    pub fn as_closure(self) -> impl Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync {
        move |args| self.eval(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_expr::parse_expression_func;
    use approx::assert_relative_eq;

    fn compiled(input: &str, vars: &[&str]) -> Lambda {
        parse_expression_func(input).unwrap().compile(vars).unwrap()
    }

    #[test]
    fn test_polynomial() {
        let f = compiled("x**2 + 3*x + 2", &["x"]);
        assert_eq!(f.eval(&[2.0]), Ok(12.0));
    }

    #[test]
    fn test_two_variables_in_declared_order() {
        let f = compiled("x - y", &["y", "x"]);
        assert_eq!(f.eval(&[1.0, 5.0]), Ok(4.0));
    }

    #[test]
    fn test_trig_and_inverse() {
        let f = compiled("sin(x)^2 + cos(x)^2", &["x"]);
        assert_relative_eq!(f.eval(&[0.7]).unwrap(), 1.0, epsilon = 1e-12);
        let g = compiled("acot(x) + atan(x)", &["x"]);
        assert_relative_eq!(g.eval(&[3.0]).unwrap(), PI / 2.0, epsilon = 1e-12);
        let h = compiled("cot(x)", &["x"]);
        assert_relative_eq!(h.eval(&[PI / 4.0]).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_symbol_is_reported_on_compile() {
        let err = parse_expression_func("x + z")
            .unwrap()
            .compile(&["x"])
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownSymbol {
                name: "z".to_string(),
                allowed: vec!["x".to_string()]
            }
        );
    }

    #[test]
    fn test_division_by_zero() {
        let f = compiled("1/x", &["x"]);
        assert_eq!(f.eval(&[0.0]), Err(EvaluationError::DivisionByZero));
        let g = compiled("x^-1", &["x"]);
        assert_eq!(g.eval(&[0.0]), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_domain_errors() {
        let f = compiled("log(x)", &["x"]);
        assert_eq!(
            f.eval(&[-1.0]),
            Err(EvaluationError::Domain {
                function: "ln",
                argument: -1.0
            })
        );
        let g = compiled("asin(x)", &["x"]);
        assert!(matches!(
            g.eval(&[1.5]),
            Err(EvaluationError::Domain {
                function: "arcsin",
                ..
            })
        ));
    }

    #[test]
    fn test_complex_result() {
        let f = compiled("sqrt(x)", &["x"]);
        assert_eq!(
            f.eval(&[-4.0]),
            Err(EvaluationError::ComplexResult {
                base: -4.0,
                exponent: 0.5
            })
        );
        // integer exponents of negative bases stay real
        let g = compiled("x^3", &["x"]);
        assert_eq!(g.eval(&[-2.0]), Ok(-8.0));
    }

    #[test]
    fn test_overflow_is_not_finite() {
        let f = compiled("exp(x)", &["x"]);
        assert!(matches!(
            f.eval(&[1000.0]),
            Err(EvaluationError::NonFinite {
                operation: "exp",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_values_are_errors() {
        let f = compiled("sin(x)", &["x"]);
        assert!(matches!(
            f.eval(&[f64::NAN]),
            Err(EvaluationError::NonFinite {
                operation: "argument",
                ..
            })
        ));
        let g = compiled("abs(x)", &["x"]);
        assert!(matches!(
            g.eval(&[f64::NEG_INFINITY]),
            Err(EvaluationError::NonFinite { .. })
        ));
        assert!(matches!(
            Lambda::Cos(Box::new(Lambda::Const(f64::INFINITY))).eval(&[]),
            Err(EvaluationError::NonFinite {
                operation: "constant",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_argument() {
        let f = compiled("x*y", &["x", "y"]);
        assert_eq!(
            f.eval(&[1.0]),
            Err(EvaluationError::ArgumentCount {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_lambdify_checked_closure() {
        let f = parse_expression_func("x*y")
            .unwrap()
            .lambdify_checked(&["x", "y"])
            .unwrap();
        assert_eq!(f(&[2.0, 3.0]), Ok(6.0));
    }
}
