//! Tokenizer and recursive-descent parser for [`Expr`].
//!
//! The grammar is the conventional one:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('-' | '+')* power
//! power  := atom ('**' factor)?
//! atom   := number | ident | ident '(' expr ')' | '(' expr ')'
//! ```
//!
//! Power is right-associative and binds tighter than unary minus, so
//! `-x**2` is `-(x**2)` and `x**-2` works without parentheses. `^` is
//! accepted as a synonym for `**`.

use std::f64::consts;

use thiserror::Error;

use super::{Expr, Func};

/// Why an input string is not a valid expression.
///
/// Positions are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number '{text}' at position {pos}")]
    MalformedNumber { text: String, pos: usize },

    #[error("unknown function '{name}' at position {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("unknown symbol '{name}' at position {pos}")]
    UnknownSymbol { name: String, pos: usize },

    #[error("expected {expected} at position {pos}")]
    UnexpectedToken { expected: &'static str, pos: usize },

    #[error("unexpected end of input")]
    UnexpectedEnd,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'+' => {
                tokens.push((Token::Plus, start));
                i += 1;
            }
            b'-' => {
                tokens.push((Token::Minus, start));
                i += 1;
            }
            b'*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    tokens.push((Token::Caret, start));
                    i += 2;
                } else {
                    tokens.push((Token::Star, start));
                    i += 1;
                }
            }
            b'/' => {
                tokens.push((Token::Slash, start));
                i += 1;
            }
            b'^' => {
                tokens.push((Token::Caret, start));
                i += 1;
            }
            b'(' => {
                tokens.push((Token::LParen, start));
                i += 1;
            }
            b')' => {
                tokens.push((Token::RParen, start));
                i += 1;
            }
            b'0'..=b'9' | b'.' => {
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                // scientific notation, but only when the exponent actually
                // follows: "2e" in "2*exp(x)" is a number then an ident
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let after_e = i + 1;
                    let exp_digits = match bytes.get(after_e).copied() {
                        Some(b'+' | b'-') => bytes.get(after_e + 1).is_some_and(u8::is_ascii_digit),
                        Some(d) => d.is_ascii_digit(),
                        None => false,
                    };
                    if exp_digits {
                        i = after_e;
                        if matches!(bytes[i], b'+' | b'-') {
                            i += 1;
                        }
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let text = &input[start..i];
                let value = text.parse::<f64>().map_err(|_| ParseError::MalformedNumber {
                    text: text.to_owned(),
                    pos: start,
                })?;
                tokens.push((Token::Num(value), start));
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((Token::Ident(input[start..i].to_owned()), start));
            }
            _ => {
                let ch = input[i..].chars().next().unwrap_or('?');
                return Err(ParseError::UnexpectedChar { ch, pos: start });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn here(&self) -> usize {
        self.tokens.get(self.pos).map_or(usize::MAX, |(_, p)| *p)
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, want: &Token, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t == want => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::UnexpectedToken {
                expected,
                pos: self.here(),
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Add(lhs.boxed(), rhs.boxed());
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Sub(lhs.boxed(), rhs.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    lhs = Expr::Mul(lhs.boxed(), rhs.boxed());
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    lhs = Expr::Div(lhs.boxed(), rhs.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(self.factor()?.boxed()))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.factor()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            // right-associative, and the exponent may carry its own sign
            let exponent = self.factor()?;
            return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let pos = self.here();
        match self.bump() {
            Some(Token::Num(v)) => Ok(Expr::Num(v)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    let func = Func::from_name(&name)
                        .ok_or(ParseError::UnknownFunction { name, pos })?;
                    self.pos += 1;
                    let arg = self.expr()?;
                    self.expect(&Token::RParen, "')'")?;
                    return Ok(Expr::Func(func, arg.boxed()));
                }
                match name.as_str() {
                    "x" => Ok(Expr::Var),
                    "pi" => Ok(Expr::Num(consts::PI)),
                    "e" => Ok(Expr::Num(consts::E)),
                    _ => Err(ParseError::UnknownSymbol { name, pos }),
                }
            }
            Some(_) => Err(ParseError::UnexpectedToken {
                expected: "a number, name or '('",
                pos,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

pub(super) fn parse(input: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let expr = parser.expr()?;
    if parser.peek().is_some() {
        return Err(ParseError::UnexpectedToken {
            expected: "end of input",
            pos: parser.here(),
        });
    }
    Ok(expr)
}
