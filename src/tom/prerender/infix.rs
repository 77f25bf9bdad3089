//! Infix arithmetic for calcn
//!
//! Grammar, loosest binding first:
//!
//!     expr    = term (("+" | "-") term)*
//!     term    = unary (("*" | "/" | "%") unary)*
//!     unary   = ("+" | "-")* power
//!     power   = atom ("^" unary)?          right associative
//!     atom    = number | "(" expr ")"
//!
//! Numbers are decimal literals (`12`, `0.5`, `.5`). Whitespace is ignored. Recursion is
//! bounded by [`MAX_DEPTH`] and every result must be finite.

use super::error::{EvalError, EvalResult};

/// Ceiling on parenthesis and exponent nesting
pub(crate) const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
    Num(f64),
    Op(char),
    Open,
    Close,
}

/// Evaluate an infix expression
pub(crate) fn evaluate(source: &str) -> EvalResult<f64> {
    let tokens = scan(source)?;
    if tokens.is_empty() {
        return Err(EvalError::Syntax("empty expression".to_string()));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(EvalError::Syntax(format!("unexpected {:?}", tok)));
    }
    finite(value)
}

fn finite(value: f64) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

fn scan(source: &str) -> EvalResult<Vec<Tok>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '+' | '-' | '*' | '/' | '%' | '^' => tokens.push(Tok::Op(c)),
            '(' => tokens.push(Tok::Open),
            ')' => tokens.push(Tok::Close),
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, d)) = chars.peek() {
                    if !(d.is_ascii_digit() || d == '.') {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let literal = &source[start..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::NotANumber(literal.to_string()))?;
                tokens.push(Tok::Num(value));
            }
            other => return Err(EvalError::Syntax(format!("unexpected character '{}'", other))),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Tok>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Tok> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Tok> {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    fn descend(&mut self) -> EvalResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> EvalResult<f64> {
        let mut value = self.term()?;
        while let Some(Tok::Op(op @ ('+' | '-'))) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> EvalResult<f64> {
        let mut value = self.unary()?;
        while let Some(Tok::Op(op @ ('*' | '/' | '%'))) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                '*' => value * rhs,
                '/' => value / rhs,
                _ => value % rhs,
            };
            value = finite(value)?;
        }
        Ok(value)
    }

    fn unary(&mut self) -> EvalResult<f64> {
        let mut negative = false;
        while let Some(Tok::Op(op @ ('+' | '-'))) = self.peek() {
            self.pos += 1;
            if op == '-' {
                negative = !negative;
            }
        }
        let value = self.power()?;
        Ok(if negative { -value } else { value })
    }

    fn power(&mut self) -> EvalResult<f64> {
        let base = self.atom()?;
        if self.peek() != Some(Tok::Op('^')) {
            return Ok(base);
        }
        self.pos += 1;
        self.descend()?;
        let exponent = self.unary()?;
        self.depth -= 1;
        finite(base.powf(exponent))
    }

    fn atom(&mut self) -> EvalResult<f64> {
        match self.bump() {
            Some(Tok::Num(value)) => Ok(value),
            Some(Tok::Open) => {
                self.descend()?;
                let value = self.expr()?;
                if self.bump() != Some(Tok::Close) {
                    return Err(EvalError::Syntax("missing ')'".to_string()));
                }
                self.depth -= 1;
                Ok(value)
            }
            Some(tok) => Err(EvalError::Syntax(format!("unexpected {:?}", tok))),
            None => Err(EvalError::Syntax("unexpected end of expression".to_string())),
        }
    }
}
