//! Errors of the expression parser and of the checked evaluator.
use thiserror::Error;

/// The text is not a valid expression over the declared variables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,
    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },
    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { name: String, position: usize },
    #[error("unknown symbol '{name}', allowed variables: {allowed:?}")]
    UnknownSymbol { name: String, allowed: Vec<String> },
    #[error("variable '{name}' is declared more than once")]
    DuplicateVariable { name: String },
}

/// A compiled expression could not produce a finite real number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{function}({argument}) is outside the domain of {function}")]
    Domain {
        function: &'static str,
        argument: f64,
    },
    #[error("{base}^{exponent} has no real value")]
    ComplexResult { base: f64, exponent: f64 },
    #[error("{operation} produced a non-finite value ({value})")]
    NonFinite { operation: &'static str, value: f64 },
    #[error("expected {expected} argument(s), got {got}")]
    ArgumentCount { expected: usize, got: usize },
}

/// Vectorized evaluation failed at one abscissa.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("evaluation failed at sample {index} (x = {x}): {source}")]
pub struct SampleEvaluationError {
    pub index: usize,
    pub x: f64,
    #[source]
    pub source: EvaluationError,
}
