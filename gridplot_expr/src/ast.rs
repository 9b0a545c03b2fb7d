// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expression trees and their evaluation.

use alloc::boxed::Box;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A parsed expression of one variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A literal or named constant.
    Num(f64),
    /// The free variable.
    X,
    /// Unary minus.
    Neg(Box<Expr>),
    /// A one-argument function.
    Call(Func, Box<Expr>),
    /// A binary operator or two-argument function.
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluates with the free variable bound to `x`.
    ///
    /// Domain errors produce `NaN` or infinities rather than failing.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Num(v) => *v,
            Self::X => x,
            Self::Neg(e) => -e.eval(x),
            Self::Call(f, e) => f.apply(e.eval(x)),
            Self::Binary(op, a, b) => op.apply(a.eval(x), b.eval(x)),
        }
    }

    /// Whether the tree mentions the free variable.
    pub fn depends_on_x(&self) -> bool {
        match self {
            Self::Num(_) => false,
            Self::X => true,
            Self::Neg(e) | Self::Call(_, e) => e.depends_on_x(),
            Self::Binary(_, a, b) => a.depends_on_x() || b.depends_on_x(),
        }
    }
}

/// Binary operators, including the two-argument functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a % b` and `mod(a, b)`: floored modulo, with `mod(a, 0) = a`.
    Mod,
    /// `a ^ b` and `pow(a, b)`.
    Pow,
    /// `min(a, b)`
    Min,
    /// `max(a, b)`
    Max,
    /// `log(a, b)`: logarithm of `a` in base `b`.
    LogBase,
}

impl BinOp {
    /// Applies the operator.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Mod => {
                if b == 0.0 {
                    a
                } else {
                    a - b * (a / b).floor()
                }
            }
            Self::Pow => a.powf(b),
            Self::Min => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.min(b)
                }
            }
            Self::Max => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.max(b)
                }
            }
            Self::LogBase => a.ln() / b.ln(),
        }
    }

    /// The two-argument function with this name.
    pub(crate) fn from_function_name(name: &str) -> Option<Self> {
        Some(match name {
            "pow" => Self::Pow,
            "mod" => Self::Mod,
            "min" => Self::Min,
            "max" => Self::Max,
            "log" => Self::LogBase,
            _ => return None,
        })
    }
}

/// One-argument functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs, reason = "the names are the standard math functions")]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm (`ln` and one-argument `log`).
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
    Floor,
    Ceil,
    /// Rounds half away from zero.
    Round,
    /// `-1`, `0` or `1`; `NaN` stays `NaN`.
    Sign,
}

impl Func {
    /// Applies the function.
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Sec => 1.0 / v.cos(),
            Self::Csc => 1.0 / v.sin(),
            Self::Cot => 1.0 / v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Log2 => v.log2(),
            Self::Sqrt => v.sqrt(),
            Self::Cbrt => v.cbrt(),
            Self::Abs => v.abs(),
            Self::Floor => v.floor(),
            Self::Ceil => v.ceil(),
            Self::Round => v.round(),
            Self::Sign => {
                if v > 0.0 {
                    1.0
                } else if v < 0.0 {
                    -1.0
                } else {
                    v
                }
            }
        }
    }

    /// The one-argument function with this name.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sec" => Self::Sec,
            "csc" => Self::Csc,
            "cot" => Self::Cot,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "sign" => Self::Sign,
            _ => return None,
        })
    }
}

/// Named constants.
pub(crate) fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(core::f64::consts::PI),
        "e" | "E" => Some(core::f64::consts::E),
        "tau" => Some(core::f64::consts::TAU),
        _ => None,
    }
}
