// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability contract between the curve tracer and an expression engine.
//!
//! gridplot does not parse math itself. A backend implements [`ExpressionEvaluator`] to turn a
//! normalized expression string into a [`CompiledExpr`], which the tracer then calls once per
//! sample with the free variable `x` bound to the sample position.
//!
//! Closures implement both traits, which keeps tests and small embedders free of any parser:
//!
//! ```
//! use std::sync::Arc;
//! use gridplot_core::{CompileError, CompiledExpr, EvalError, ExpressionEvaluator, SharedExpr};
//!
//! let square = |_: &str| -> Result<SharedExpr, CompileError> {
//!     Ok(Arc::new(|x: f64| -> Result<f64, EvalError> { Ok(x * x) }))
//! };
//! let f = square.compile("x^2").unwrap();
//! assert_eq!(f.eval(3.0), Ok(9.0));
//! ```

use alloc::string::String;
use alloc::sync::Arc;

/// A compiled expression of one variable.
pub trait CompiledExpr {
    /// Evaluates the expression with `x` bound to the given value.
    ///
    /// Failures are per-sample: the tracer lifts the pen and moves on.
    fn eval(&self, x: f64) -> Result<f64, EvalError>;
}

impl<F> CompiledExpr for F
where
    F: Fn(f64) -> Result<f64, EvalError>,
{
    fn eval(&self, x: f64) -> Result<f64, EvalError> {
        self(x)
    }
}

/// A compiled expression that can be shared between renders and cache entries.
pub type SharedExpr = Arc<dyn CompiledExpr + Send + Sync>;

/// Compiles normalized expression text into callables.
pub trait ExpressionEvaluator {
    /// Compiles `expr`, which has already had its `y =` prefix stripped and implicit
    /// multiplication made explicit.
    fn compile(&self, expr: &str) -> Result<SharedExpr, CompileError>;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str) -> Result<SharedExpr, CompileError>,
{
    fn compile(&self, expr: &str) -> Result<SharedExpr, CompileError> {
        self(expr)
    }
}

/// An expression could not be compiled.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    /// Human-readable description.
    pub message: String,
    /// Byte offset into the expression where the problem was found, if known.
    pub offset: Option<usize>,
}

impl CompileError {
    /// Creates an error without position information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates an error pointing at a byte offset.
    pub fn at(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset: Some(offset),
        }
    }
}

/// A single evaluation failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("evaluation failed: {0}")]
pub struct EvalError(pub String);
