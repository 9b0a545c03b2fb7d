// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive-descent parser.
//!
//! Precedence, loosest first:
//! - `additive`: `+`, `-`
//! - `multiplicative`: `*`, `/`, `%`, and juxtaposition (`2sin(x)`, `(x+1)(x-1)`, `2pi x`)
//! - `unary`: prefix `+`, `-`
//! - `power`: `^`, right-associative, whose exponent may itself carry a sign (`2^-x`)
//! - `primary`: numbers, `x`, constants, calls, parentheses
//!
//! Unary minus sits above `^`, so `-x^2` is `-(x^2)`. A juxtaposed operand never starts with a
//! sign, so `2 -x` is still a subtraction.
//!
//! Operator chains such as `x+x+x` build left-deep trees without going through the nesting
//! counter, so the token count is capped as well. Tree height never exceeds it.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use gridplot_core::CompileError;
use smallvec::SmallVec;

use crate::ast::{BinOp, Expr, Func, constant};
use crate::lex::{Token, TokenKind, tokenize};

/// Deepest nesting accepted before parsing gives up.
pub const MAX_DEPTH: usize = 256;

/// Longest expression accepted, in tokens.
pub const MAX_TOKENS: usize = 2048;

/// Parses `src` into an expression tree.
pub fn parse(src: &str) -> Result<Expr, CompileError> {
    let tokens = tokenize(src)?;
    // `tokens` ends with `End`, which does not count.
    if let Some(t) = tokens.get(MAX_TOKENS)
        && t.kind != TokenKind::End
    {
        return Err(CompileError::at(
            format!("expression is longer than {MAX_TOKENS} tokens"),
            t.offset,
        ));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.additive()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::End {
        return Err(CompileError::at("unexpected token", trailing.offset));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Token<'a> {
        // The token list always ends with `End`, and `pos` never moves past it.
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token<'a> {
        let t = self.peek();
        if t.kind != TokenKind::End {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, kind: TokenKind<'_>, what: &str) -> Result<(), CompileError> {
        let t = self.peek();
        if t.kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(unexpected(t, what))
        }
    }

    fn enter(&mut self, offset: usize) -> Result<(), CompileError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CompileError::at("expression is nested too deeply", offset));
        }
        Ok(())
    }

    fn additive(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen => {
                    let rhs = self.unary()?;
                    lhs = Expr::Binary(BinOp::Mul, Box::new(lhs), Box::new(rhs));
                    continue;
                }
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, CompileError> {
        let t = self.peek();
        match t.kind {
            TokenKind::Minus | TokenKind::Plus => {
                self.bump();
                self.enter(t.offset)?;
                let operand = self.unary();
                self.depth -= 1;
                let operand = operand?;
                Ok(if t.kind == TokenKind::Minus {
                    Expr::Neg(Box::new(operand))
                } else {
                    operand
                })
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, CompileError> {
        let base = self.primary()?;
        let t = self.peek();
        if t.kind != TokenKind::Caret {
            return Ok(base);
        }
        self.bump();
        self.enter(t.offset)?;
        let exponent = self.unary();
        self.depth -= 1;
        Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent?)))
    }

    fn primary(&mut self) -> Result<Expr, CompileError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::LParen => {
                self.enter(t.offset)?;
                let inner = self.additive();
                self.depth -= 1;
                let inner = inner?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                let callable = name != "x" && constant(name).is_none();
                if callable && self.peek().kind == TokenKind::LParen {
                    self.bump();
                    self.call(name, t.offset)
                } else if name == "x" {
                    Ok(Expr::X)
                } else if let Some(v) = constant(name) {
                    Ok(Expr::Num(v))
                } else {
                    Err(CompileError::at(
                        format!("unknown identifier `{name}`"),
                        t.offset,
                    ))
                }
            }
            _ => Err(unexpected(t, "a number, `x`, a function or `(`")),
        }
    }

    /// Parses the argument list of `name(`, after the opening parenthesis.
    fn call(&mut self, name: &str, offset: usize) -> Result<Expr, CompileError> {
        let one = Func::from_name(name);
        let two = BinOp::from_function_name(name);
        if one.is_none() && two.is_none() {
            return Err(CompileError::at(
                format!("unknown function `{name}`"),
                offset,
            ));
        }

        self.enter(offset)?;
        let args = self.arguments();
        self.depth -= 1;
        let mut args = args?;

        match (args.len(), one, two) {
            (1, Some(f), _) => {
                let a = args.pop().map(Box::new);
                a.map(|a| Expr::Call(f, a))
                    .ok_or_else(|| CompileError::at("missing argument", offset))
            }
            (2, _, Some(op)) => {
                let b = args.pop();
                let a = args.pop();
                match (a, b) {
                    (Some(a), Some(b)) => Ok(Expr::Binary(op, Box::new(a), Box::new(b))),
                    _ => Err(CompileError::at("missing argument", offset)),
                }
            }
            (n, _, _) => {
                let expected = match (one, two) {
                    (Some(_), Some(_)) => "1 or 2 arguments",
                    (Some(_), None) => "1 argument",
                    _ => "2 arguments",
                };
                Err(CompileError::at(
                    format!("`{name}` takes {expected}, got {n}"),
                    offset,
                ))
            }
        }
    }

    fn arguments(&mut self) -> Result<SmallVec<[Expr; 2]>, CompileError> {
        let mut args = SmallVec::new();
        if self.peek().kind == TokenKind::RParen {
            self.bump();
            return Ok(args);
        }
        loop {
            args.push(self.additive()?);
            let t = self.bump();
            match t.kind {
                TokenKind::Comma => {}
                TokenKind::RParen => return Ok(args),
                _ => return Err(unexpected(t, "`,` or `)`")),
            }
        }
    }
}

fn unexpected(t: Token<'_>, expected: &str) -> CompileError {
    if t.kind == TokenKind::End {
        CompileError::at(
            format!("unexpected end of expression, expected {expected}"),
            t.offset,
        )
    } else {
        CompileError::at(format!("unexpected token, expected {expected}"), t.offset)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn eval(src: &str, x: f64) -> f64 {
        parse(src).unwrap().eval(x)
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(eval("2*x + 3", 4.0), 11.0);
        assert_eq!(eval("2 + 3 * 4", 0.0), 14.0);
        assert_eq!(eval("2^3^2", 0.0), 512.0);
        assert_eq!(eval("-x^2", 3.0), -9.0);
        assert_eq!(eval("2^-1", 0.0), 0.5);
        assert_eq!(eval("10 - 4 - 3", 0.0), 3.0);
        assert_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_eq!(eval("7 % 4", 0.0), 3.0);
        assert_eq!(eval("--x", 2.0), 2.0);
    }

    #[test]
    fn functions_and_constants() {
        assert!((eval("sin(pi/2)", 0.0) - 1.0).abs() < 1e-12);
        assert!((eval("ln(e)", 0.0) - 1.0).abs() < 1e-12);
        assert!((eval("log(100, 10)", 0.0) - 2.0).abs() < 1e-12);
        assert_eq!(eval("max(x, 1)", -5.0), 1.0);
        assert_eq!(eval("pow(2, 10)", 0.0), 1024.0);
        assert_eq!(eval("abs(x)", -3.0), 3.0);
        assert!((eval("tau", 0.0) - 2.0 * core::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn non_finite_results_pass_through() {
        assert_eq!(eval("1/x", 0.0), f64::INFINITY);
        assert!(eval("sqrt(x)", -1.0).is_nan());
    }

    #[test]
    fn errors_point_at_the_problem() {
        let err = parse("2 * y").unwrap_err();
        assert_eq!(err.offset, Some(4));
        assert!(err.message.contains("unknown identifier"));

        let err = parse("foo(x)").unwrap_err();
        assert!(err.message.contains("unknown function"));

        let err = parse("sin(x, 2)").unwrap_err();
        assert_eq!(err.message, "`sin` takes 1 argument, got 2");

        let err = parse("sin(").unwrap_err();
        assert!(err.message.starts_with("unexpected end of expression"));

        let err = parse("x )").unwrap_err();
        assert_eq!(err.offset, Some(2));

        assert!(parse("").is_err());
        assert!(parse("()").is_err());
    }

    #[test]
    fn deep_nesting_is_rejected_not_overflowed() {
        let src = "(".repeat(MAX_DEPTH + 1) + "x" + &")".repeat(MAX_DEPTH + 1);
        let err = parse(&src).unwrap_err();
        assert!(err.message.contains("nested too deeply"));
        let ok = "(".repeat(10) + "x" + &")".repeat(10);
        assert_eq!(parse(&ok).unwrap(), Expr::X);
    }

    #[test]
    fn juxtaposition_multiplies() {
        assert!((eval("2sin(x)", core::f64::consts::FRAC_PI_2) - 2.0).abs() < 1e-12);
        assert_eq!(eval("(x+1)(x-1)", 3.0), 8.0);
        assert!((eval("2pi x", 1.5) - 3.0 * core::f64::consts::PI).abs() < 1e-12);
        assert_eq!(eval("x x", 3.0), 9.0);
        assert_eq!(eval("x(x+1)", 2.0), 6.0);
        assert_eq!(eval("3 2", 0.0), 6.0);
        // Same precedence as `*`, and `^` still binds tighter.
        assert_eq!(eval("6/2(1+2)", 0.0), 9.0);
        assert_eq!(eval("2x^2", 3.0), 18.0);
        assert_eq!(eval("2 -x", 5.0), -3.0);
        assert!(parse("2 y").is_err());
    }

    #[test]
    fn long_chains_are_rejected_not_overflowed() {
        let long = std::string::String::from("x") + &"+x".repeat(200_000);
        let err = parse(&long).unwrap_err();
        assert!(err.message.contains("longer than"), "{}", err.message);
        assert_eq!(err.offset, Some(MAX_TOKENS));

        let product = std::string::String::from("x") + &" x".repeat(200_000);
        assert!(parse(&product).is_err());

        // Just under the cap still parses and evaluates.
        let terms = MAX_TOKENS / 2;
        let fits = std::string::String::from("1") + &"+1".repeat(terms - 1);
        assert_eq!(eval(&fits, 0.0), terms as f64);
    }
}
