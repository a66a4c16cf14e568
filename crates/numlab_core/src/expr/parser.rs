//! Shunting-yard parser producing reverse Polish notation, and its evaluation.

use super::scalar::{Scalar, UnaryFunction};
use super::tokenizer::{Token, Tokenizer};
use crate::types::EvaluationError;

#[derive(Debug, PartialEq)]
enum Assoc {
    Left,
    Right,
    None,
}

fn precedence(token: &Token) -> (usize, Assoc) {
    // Unary minus shares the precedence of `^` and both associate to the
    // right, so `-x^2` is `-(x^2)` and `2^-3` is `2^(-3)`.
    match *token {
        Token::OpenParen => (1, Assoc::Left), // keep at bottom
        Token::BinaryOp('+') | Token::BinaryOp('-') => (2, Assoc::Left),
        Token::BinaryOp('*') | Token::BinaryOp('/') | Token::BinaryOp('%') => (3, Assoc::Left),
        Token::UnaryOp(_) => (5, Assoc::Right),
        Token::BinaryOp('^') => (5, Assoc::Right),
        Token::Function(_, _) => (7, Assoc::Left),
        _ => (99, Assoc::None),
    }
}

/// A parsed expression in reverse Polish notation.
///
/// Parse once with [`Expression::parse`], then evaluate any number of times
/// with different variable values.
///
/// # Example
///
/// ```
/// use numlab_core::expr::Expression;
///
/// let expr = Expression::parse("x^2 - 7").unwrap();
/// let value: f64 = expr.eval(|name| (name == "x").then_some(3.0)).unwrap();
/// assert_eq!(value, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    rpn: Vec<Token>,
}

impl Expression {
    /// Parse `source` into reverse Polish notation.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::Syntax`] on unknown characters, unbalanced
    /// parentheses or an empty expression.
    pub fn parse(source: &str) -> Result<Self, EvaluationError> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, Token)> = Vec::new();
        let mut arity = Vec::<usize>::new();

        for item in Tokenizer::new(source) {
            let (position, token) = item?;
            match token {
                Token::Number(_) | Token::Variable(_) => out.push(token),
                Token::OpenParen => stack.push((position, token)),
                Token::Function(_, _) => {
                    stack.push((position, token));
                    arity.push(1);
                }
                Token::Comma | Token::CloseParen => {
                    while let Some((_, top)) = stack.last() {
                        if *top == Token::OpenParen {
                            break;
                        }
                        if let Some((_, top)) = stack.pop() {
                            out.push(top);
                        }
                    }
                    if stack.is_empty() {
                        return Err(EvaluationError::Syntax {
                            position,
                            message: "missing opening parenthesis".to_string(),
                        });
                    }
                    if token == Token::CloseParen {
                        stack.pop(); // peel matching OpenParen
                        match stack.pop() {
                            Some((_, Token::Function(name, _))) => {
                                let n = arity.pop().unwrap_or(1);
                                out.push(Token::Function(name, n));
                            }
                            Some(other) => stack.push(other),
                            None => (),
                        }
                    } else if let Some(a) = arity.last_mut() {
                        *a += 1;
                    }
                }
                Token::UnaryOp(_) | Token::BinaryOp(_) => {
                    let (prec_rhs, assoc_rhs) = precedence(&token);
                    while let Some((_, top)) = stack.last() {
                        let (prec_lhs, _) = precedence(top);
                        if prec_lhs < prec_rhs {
                            break;
                        } else if prec_lhs == prec_rhs {
                            match assoc_rhs {
                                Assoc::Left => (),
                                Assoc::Right => break,
                                Assoc::None => {
                                    return Err(EvaluationError::Syntax {
                                        position,
                                        message: "operator has no associativity".to_string(),
                                    })
                                }
                            }
                        }
                        if let Some((_, top)) = stack.pop() {
                            out.push(top);
                        }
                    }
                    stack.push((position, token));
                }
            }
        }

        while let Some((position, top)) = stack.pop() {
            match top {
                Token::OpenParen | Token::Function(_, _) => {
                    return Err(EvaluationError::Syntax {
                        position,
                        message: "missing closing parenthesis".to_string(),
                    })
                }
                token => out.push(token),
            }
        }

        if out.is_empty() {
            return Err(EvaluationError::Syntax {
                position: 0,
                message: "empty expression".to_string(),
            });
        }
        Ok(Self { rpn: out })
    }

    /// The expression in reverse Polish order.
    pub fn tokens(&self) -> &[Token] {
        &self.rpn
    }

    /// Evaluate the expression, resolving names through `lookup`.
    ///
    /// Names `lookup` does not resolve fall back to the constants `pi` and
    /// `e`. The result is not checked for finiteness.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] for unknown variables or functions,
    /// wrong argument counts, or operators without enough operands.
    pub fn eval<S, L>(&self, lookup: L) -> Result<S, EvaluationError>
    where
        S: Scalar,
        L: Fn(&str) -> Option<S>,
    {
        let mut operands: Vec<S> = Vec::new();
        let missing = || EvaluationError::Malformed("operator is missing an operand".to_string());

        for token in &self.rpn {
            match *token {
                Token::Number(num) => operands.push(S::constant(num)),
                Token::Variable(ref name) => {
                    let value = lookup(name)
                        .or_else(|| constant(name).map(S::constant))
                        .ok_or_else(|| EvaluationError::UnknownVariable(name.clone()))?;
                    operands.push(value);
                }
                Token::BinaryOp(op) => {
                    let r = operands.pop().ok_or_else(missing)?;
                    let l = operands.pop().ok_or_else(missing)?;
                    operands.push(match op {
                        '+' => l + r,
                        '-' => l - r,
                        '*' => l * r,
                        '/' => l / r,
                        '%' => l.rem(r),
                        '^' => l.pow(r),
                        other => {
                            return Err(EvaluationError::Malformed(format!(
                                "unknown operator `{}`",
                                other
                            )))
                        }
                    });
                }
                Token::UnaryOp(op) => {
                    let o = operands.pop().ok_or_else(missing)?;
                    operands.push(if op == '-' { -o } else { o });
                }
                Token::Function(ref name, n) => {
                    if n > operands.len() {
                        return Err(missing());
                    }
                    let cut = operands.len() - n;
                    let args = operands.split_off(cut);
                    operands.push(call(name, &args)?);
                }
                Token::OpenParen | Token::CloseParen | Token::Comma => {
                    return Err(EvaluationError::Malformed(format!(
                        "unexpected token {:?}",
                        token
                    )))
                }
            }
        }

        let result = operands.pop().ok_or_else(missing)?;
        if !operands.is_empty() {
            return Err(EvaluationError::Malformed(
                "operands without an operator".to_string(),
            ));
        }
        Ok(result)
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

fn call<S: Scalar>(name: &str, args: &[S]) -> Result<S, EvaluationError> {
    let wrong_count = || EvaluationError::WrongArgumentCount {
        function: name.to_string(),
        got: args.len(),
    };
    match (name, args) {
        ("log", [x, base]) => Ok(x.apply(UnaryFunction::Ln) / base.apply(UnaryFunction::Ln)),
        ("pow", [x, y]) => Ok(x.pow(*y)),
        ("max", [first, rest @ ..]) => Ok(rest
            .iter()
            .fold(*first, |a, &b| if b.value() > a.value() { b } else { a })),
        ("min", [first, rest @ ..]) => Ok(rest
            .iter()
            .fold(*first, |a, &b| if b.value() < a.value() { b } else { a })),
        ("pow", _) | ("max", _) | ("min", _) => Err(wrong_count()),
        _ => {
            let function = UnaryFunction::from_name(name)
                .ok_or_else(|| EvaluationError::UnknownFunction(name.to_string()))?;
            match args {
                [x] => Ok(x.apply(function)),
                _ => Err(wrong_count()),
            }
        }
    }
}
