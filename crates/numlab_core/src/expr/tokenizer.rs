//! Tokenizer for arithmetic expressions.

use crate::types::EvaluationError;

/// A lexical token of an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Identifier not followed by `(`: a variable or named constant
    Variable(String),
    /// Identifier followed by `(`, with its argument count once parsed
    Function(String, usize),
    /// Prefix `-` or `+`
    UnaryOp(char),
    /// One of `+ - * / % ^`
    BinaryOp(char),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,`
    Comma,
}

/// Splits an expression into [`Token`]s, each paired with its character offset.
///
/// Whether a `-` or `+` is unary depends on the previous token: it is binary
/// only after a number, a variable or a closing parenthesis.
///
/// # Example
///
/// ```
/// use numlab_core::expr::{Token, Tokenizer};
///
/// let tokens: Vec<Token> = Tokenizer::new("-x^2")
///     .map(|t| t.unwrap().1)
///     .collect();
/// assert_eq!(tokens[0], Token::UnaryOp('-'));
/// assert_eq!(tokens[2], Token::BinaryOp('^'));
/// ```
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    prev: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            prev: None,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn makes_unary(&self) -> bool {
        !matches!(
            self.prev,
            Some(Token::Number(_)) | Some(Token::Variable(_)) | Some(Token::CloseParen)
        )
    }

    /// True if the input at the cursor is an exponent suffix such as `e-3`.
    fn at_exponent(&self) -> bool {
        let mut chars = self.rest().chars();
        if !matches!(chars.next(), Some('e') | Some('E')) {
            return false;
        }
        match chars.next() {
            Some('+') | Some('-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, EvaluationError> {
        self.skip_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            self.skip_while(|c| c.is_ascii_digit());
        }
        if self.at_exponent() {
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            self.skip_while(|c| c.is_ascii_digit());
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| EvaluationError::Syntax {
                position: start,
                message: format!("invalid number `{}`", text),
            })
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        self.skip_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let name = self.src[start..self.pos].to_string();
        // peek past whitespace: `sin (x)` is still a call
        let after_ws = self.rest().trim_start();
        if after_ws.starts_with('(') {
            Token::Function(name, 0)
        } else {
            Token::Variable(name)
        }
    }

    fn next_token(&mut self) -> Option<Result<(usize, Token), EvaluationError>> {
        self.skip_while(char::is_whitespace);
        let start = self.pos;
        let c = self.peek()?;

        let token = match c {
            '(' => {
                self.bump();
                Ok(Token::OpenParen)
            }
            ')' => {
                self.bump();
                Ok(Token::CloseParen)
            }
            ',' => {
                self.bump();
                Ok(Token::Comma)
            }
            '-' | '+' => {
                self.bump();
                if self.makes_unary() {
                    Ok(Token::UnaryOp(c))
                } else {
                    Ok(Token::BinaryOp(c))
                }
            }
            '*' | '/' | '%' | '^' => {
                self.bump();
                Ok(Token::BinaryOp(c))
            }
            '0'..='9' | '.' => self.scan_number(start),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.scan_identifier(start)),
            other => {
                self.bump();
                Err(EvaluationError::Syntax {
                    position: start,
                    message: format!("unexpected character `{}`", other),
                })
            }
        };
        Some(token.map(|t| (start, t)))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<(usize, Token), EvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.next_token();
        if let Some(Ok((_, ref token))) = item {
            self.prev = Some(token.clone());
        }
        item
    }
}
