use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::ParseError;
use std::f64::consts::{E, PI};
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedQuad::symbolic::parse_expr::parse_expression_func;
/// let parsed_expression = parse_expression_func("x**2 + 3*x + 2").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
//                  precedence ladder (low -> high)
//                |  sum      a + b, a - b        left  |
//                |  product  a * b, a / b        left  |
//                |  unary    -a, +a                    |
//                |  power    a ^ b, a ** b       right |
//                |  atom     number, name, f(..), (..) |
//  the exponent of a power is parsed as a unary, so 2^-1 is accepted and -x^2 == -(x^2)

/// Parses `input` into a symbolic expression. Variable names are not checked here,
/// see `Expression::parse` for the binding to declared variables.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    let mut parser = ExprParser::new(input);
    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(ParseError::Empty);
    }
    let expr = parser.parse_sum()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(expr),
        Some(')') => Err(ParseError::UnbalancedParenthesis {
            position: parser.pos,
        }),
        Some(c) => Err(ParseError::UnexpectedChar {
            found: c,
            position: parser.pos,
        }),
    }
}

/// Maps a function name to the node it builds, `None` for unknown names.
fn function_node(name: &str, arg: Expr) -> Option<Expr> {
    let node = match name {
        "exp" => arg.exp(),
        "log" | "ln" => arg.ln(),
        "sqrt" => arg.pow(Expr::Const(0.5)),
        _ => return unary_node(name, arg.boxed()),
    };
    Some(node)
}

fn unary_node(name: &str, arg: Box<Expr>) -> Option<Expr> {
    let node = match name {
        "abs" => Expr::Abs(arg),
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "cot" | "ctg" => Expr::ctg(arg),
        "asin" | "arcsin" => Expr::arcsin(arg),
        "acos" | "arccos" => Expr::arccos(arg),
        "atan" | "arctan" | "arctg" => Expr::arctg(arg),
        "acot" | "arccot" | "arcctg" => Expr::arcctg(arg),
        _ => return None,
    };
    Some(node)
}

struct ExprParser {
    chars: Vec<char>,
    pos: usize,
}

impl ExprParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_product()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    let right = self.parse_product()?;
                    left = Expr::Add(left.boxed(), right.boxed());
                }
                Some('-') => {
                    self.pos += 1;
                    let right = self.parse_product()?;
                    left = Expr::Sub(left.boxed(), right.boxed());
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_product(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            match (self.peek(), self.peek_at(1)) {
                (Some('*'), next) if next != Some('*') => {
                    self.pos += 1;
                    let right = self.parse_unary()?;
                    left = Expr::Mul(left.boxed(), right.boxed());
                }
                (Some('/'), _) => {
                    self.pos += 1;
                    let right = self.parse_unary()?;
                    left = Expr::Div(left.boxed(), right.boxed());
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                let operand = self.parse_unary()?;
                Ok(match operand {
                    Expr::Const(val) => Expr::Const(-val),
                    other => -other,
                })
            }
            Some('+') => {
                self.pos += 1;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_atom()?;
        self.skip_whitespace();
        match (self.peek(), self.peek_at(1)) {
            (Some('^'), _) => self.pos += 1,
            (Some('*'), Some('*')) => self.pos += 2,
            _ => return Ok(base),
        }
        let exponent = self.parse_unary()?;
        Ok(base.pow(exponent))
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd {
                expected: "a number, variable, function or '('",
            }),
            Some('(') => self.parse_parenthesised(),
            Some(')') => Err(ParseError::UnbalancedParenthesis { position: self.pos }),
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_name(),
            Some(c) => Err(ParseError::UnexpectedChar {
                found: c,
                position: self.pos,
            }),
        }
    }

    fn parse_parenthesised(&mut self) -> Result<Expr, ParseError> {
        let open = self.pos;
        self.pos += 1;
        let inner = self.parse_sum()?;
        self.skip_whitespace();
        match self.peek() {
            Some(')') => {
                self.pos += 1;
                Ok(inner)
            }
            None => Err(ParseError::UnbalancedParenthesis { position: open }),
            Some(c) => Err(ParseError::UnexpectedChar {
                found: c,
                position: self.pos,
            }),
        }
    }

    fn take_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn parse_number(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        self.take_digits();
        if self.peek() == Some('.') {
            self.pos += 1;
            self.take_digits();
        }
        // exponent only when digits follow, so "2*E" style input keeps working
        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+') | Some('-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.take_digits();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        // literals that overflow to infinity are rejected here
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Expr::Const(value)),
            _ => Err(ParseError::InvalidNumber {
                text,
                position: start,
            }),
        }
    }

    fn parse_name(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        self.skip_whitespace();
        if self.peek() == Some('(') {
            let arg = self.parse_parenthesised()?;
            return function_node(&name, arg).ok_or(ParseError::UnknownFunction {
                name,
                position: start,
            });
        }
        Ok(match name.as_str() {
            "pi" => Expr::Const(PI),
            "E" => Expr::Const(E),
            _ => Expr::Var(name),
        })
    }
}
