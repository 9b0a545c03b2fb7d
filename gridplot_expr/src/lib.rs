// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small math expression engine for gridplot function layers.
//!
//! Expressions are functions of a single variable `x`:
//!
//! - numbers (`2`, `0.5`, `.5`, `1e-3`), the constants `pi`, `e` and `tau`;
//! - `+ - * / %` and `^` (right-associative, binding tighter than unary minus, so `-x^2`
//!   is `-(x^2)`);
//! - one-argument functions `sin cos tan sec csc cot asin acos atan sinh cosh tanh exp ln log
//!   log10 log2 sqrt cbrt abs floor ceil round sign`;
//! - two-argument functions `log(v, base) pow(a, b) min(a, b) max(a, b) mod(a, b)`.
//!
//! Juxtaposition multiplies at the same precedence as `*`: `2sin(x)`, `(x+1)(x-1)` and `2pi x`
//! all compile. Expressions are capped at [`MAX_TOKENS`] tokens and [`MAX_DEPTH`] levels of
//! nesting so evaluation never runs out of stack.
//!
//! Evaluation follows IEEE semantics: `1/x` at zero is infinite and `sqrt(-1)` is `NaN`. The
//! curve tracer treats both as gaps in the curve.
//!
//! ```
//! use gridplot_core::{CompiledExpr, ExpressionEvaluator};
//! use gridplot_expr::Evaluator;
//!
//! let f = Evaluator.compile("x^2 - 4").unwrap();
//! assert_eq!(f.eval(3.0), Ok(5.0));
//! assert!(Evaluator.compile("x +").is_err());
//! ```

#![no_std]

extern crate alloc;

mod ast;
#[cfg(not(feature = "std"))]
mod float;
mod lex;
mod parse;

use alloc::string::String;
use alloc::sync::Arc;

use gridplot_core::{CompileError, CompiledExpr, EvalError, ExpressionEvaluator, SharedExpr};

pub use ast::{BinOp, Expr, Func};
pub use parse::{MAX_DEPTH, MAX_TOKENS, parse};

/// The expression engine. Stateless; compiled results are cached by the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl ExpressionEvaluator for Evaluator {
    fn compile(&self, expr: &str) -> Result<SharedExpr, CompileError> {
        let compiled = Compiled::new(expr)?;
        tracing::trace!(
            expr,
            constant = !compiled.ast.depends_on_x(),
            "parsed expression"
        );
        Ok(Arc::new(compiled))
    }
}

/// A parsed expression together with its source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Compiled {
    source: String,
    ast: Expr,
}

impl Compiled {
    /// Parses `source`.
    pub fn new(source: &str) -> Result<Self, CompileError> {
        Ok(Self {
            source: String::from(source),
            ast: parse(source)?,
        })
    }

    /// The text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The expression tree.
    pub fn ast(&self) -> &Expr {
        &self.ast
    }
}

impl CompiledExpr for Compiled {
    fn eval(&self, x: f64) -> Result<f64, EvalError> {
        Ok(self.ast.eval(x))
    }
}
