#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedQuad::symbolic::symbolic_expression::Expression;
/// let input = "x**2 + 3*x + 2";
/// let f = Expression::of_x(input).unwrap();
/// println!("{}: f(1) = {}", f, f.evaluate_x(1.0).unwrap());
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// the expression tree, substitution and variable inspection
pub mod symbolic_engine;
/// errors of parsing and of checked evaluation
pub mod symbolic_errors;
///____________________________________________________________________________________________________________________________
/// turns a symbolic expression into a checked Rust function
/// Example#
/// ```
/// use RustedQuad::symbolic::parse_expr::parse_expression_func;
/// use RustedQuad::symbolic::symbolic_errors::EvaluationError;
/// let expr = parse_expression_func("log(x)/y").unwrap();
/// let f = expr.lambdify_checked(&["x", "y"]).unwrap();
/// assert_eq!(f(&[1.0, 2.0]), Ok(0.0));
/// assert_eq!(f(&[1.0, 0.0]), Err(EvaluationError::DivisionByZero));
/// ```
pub mod symbolic_lambdify;
///______________________________________________________________________________________________________________________________________________
/// expression bound to declared variables: single variable `x` or `x` with a constant `y`
/// Example#
/// ```
/// use RustedQuad::symbolic::symbolic_expression::Expression;
/// let f = Expression::of_x_and_y("x*y").unwrap();
/// let values = f.evaluate_many(&[0.0, 1.0, 2.0], &[3.0]).unwrap();
/// assert_eq!(values, vec![0.0, 3.0, 6.0]);
/// ```
pub mod symbolic_expression;
