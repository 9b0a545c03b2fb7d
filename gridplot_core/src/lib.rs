// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for gridplot.
//!
//! This crate holds the pieces every other gridplot crate agrees on:
//! - **Configuration**: the [`Viewport`] (visible graph-space rectangle plus grid/label
//!   density) and the shared [`Style`].
//! - **Coordinate mapping**: [`Mapper`] converts between graph space (y up) and device space
//!   (y down, origin top-left) for one viewport snapshot.
//! - **Output model**: a [`Document`] of ordered [`Layer`]s holding [`Mark`]s, with a single
//!   clip rectangle shared by every clipped layer.
//! - **Evaluator contract**: [`ExpressionEvaluator`] and [`CompiledExpr`] describe what the
//!   curve tracer needs from an expression engine, without depending on any particular one.
//!
//! Everything here is plain data. Rendering a figure takes an immutable snapshot of these
//! values and returns a fresh [`Document`].

#![no_std]

extern crate alloc;

mod document;
mod error;
mod eval;
#[cfg(not(feature = "std"))]
mod float;
mod scale;
mod style;
mod viewport;
pub mod z_order;

pub use document::{
    Document, FontWeight, Layer, LayerRole, Mark, MarkId, Shape, TextAnchor, TextBaseline,
    TextSpec,
};
pub use error::{Axis, RenderError, StepKind};
pub use eval::{CompileError, CompiledExpr, EvalError, ExpressionEvaluator, SharedExpr};
pub use scale::ScaleLinear;
pub use style::{StrokeStyle, Style};
pub use viewport::{Mapper, PAD_FRACTION, Viewport};
