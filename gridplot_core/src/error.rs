// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-fatal errors.

use core::fmt;

use crate::eval::CompileError;

/// A graph axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The horizontal axis.
    X,
    /// The vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Which viewport step a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// `minor_step`.
    Minor,
    /// `major_step`.
    Major,
    /// `label_step`.
    Label,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minor => "minor grid",
            Self::Major => "major grid",
            Self::Label => "label",
        })
    }
}

/// An error that aborts a whole render.
///
/// No partial document is produced when one of these is returned; the caller keeps whatever
/// it rendered last.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// `max <= min` (or a bound is `NaN`) on one axis.
    #[error("ranges must satisfy {axis}max > {axis}min (got {min} and {max})")]
    InvalidRange {
        /// The offending axis.
        axis: Axis,
        /// The configured minimum.
        min: f64,
        /// The configured maximum.
        max: f64,
    },
    /// A grid or label step is not strictly positive.
    #[error("{step} step must be > 0 (got {value})")]
    NonPositiveStep {
        /// The offending step.
        step: StepKind,
        /// The configured value.
        value: f64,
    },
    /// The canvas size is not a positive finite number.
    #[error("canvas size must be a positive number (got {0})")]
    InvalidCanvasSize(f64),
    /// An enabled function layer has an empty expression.
    #[error("function {}: expression is empty", .layer + 1)]
    EmptyExpression {
        /// Zero-based index of the function layer.
        layer: usize,
    },
    /// An enabled function layer's expression failed to compile.
    #[error("function {}: {source}", .layer + 1)]
    Compile {
        /// Zero-based index of the function layer.
        layer: usize,
        /// The evaluator's error.
        source: CompileError,
    },
}
