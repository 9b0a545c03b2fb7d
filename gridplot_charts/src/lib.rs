// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartesian plot building blocks for `gridplot_core`.
//!
//! This crate turns an editable [`Figure`] into a [`gridplot_core::Document`]:
//! - **Grid layout** places minor/major gridlines, axes, the border and tick labels.
//! - **Curve tracing** samples `y = f(x)` layers into polylines that lift the pen wherever the
//!   function leaves the visible range or fails to evaluate.
//! - **Overlays** parse free-text point and segment lists and place annotations, with a small
//!   command model for dragging annotations.
//! - **Compositing** stacks everything in a fixed z-order with the data and clipped
//!   annotations restricted to the plot area.
//!
//! Expression parsing is pluggable through [`gridplot_core::ExpressionEvaluator`]; see the
//! `gridplot_expr` crate for a concrete engine.
//!
//! ```
//! use std::sync::Arc;
//! use gridplot_charts::{Figure, FunctionLayer, Renderer};
//! use gridplot_core::{CompileError, EvalError, LayerRole, SharedExpr};
//!
//! // A toy evaluator that understands exactly one expression.
//! let evaluator = |src: &str| -> Result<SharedExpr, CompileError> {
//!     match src {
//!         "2*x + 3" => Ok(Arc::new(|x: f64| -> Result<f64, EvalError> { Ok(2.0 * x + 3.0) })),
//!         _ => Err(CompileError::new("unsupported")),
//!     }
//! };
//!
//! let mut figure = Figure::default();
//! figure.add_function(FunctionLayer::new("y = 2x + 3")).unwrap();
//!
//! let mut renderer = Renderer::new(evaluator);
//! let doc = renderer.render(&figure).unwrap();
//! assert_eq!(doc.marks_in(LayerRole::Data).count(), 1);
//! ```

#![no_std]

extern crate alloc;

mod annotation;
mod compose;
mod expr;
mod figure;
#[cfg(not(feature = "std"))]
mod float;
mod grid;
mod ids;
mod layers;
mod overlay;
mod parse;
#[cfg(test)]
mod render_tests;
mod renderer;
mod tracer;

pub use annotation::{AnnotationDrag, annotation_mark, annotation_marks};
pub use compose::compose;
pub use expr::{
    ExpressionCache, normalize_expression, prepare_expression, soften_implicit_multiplication,
};
pub use figure::{
    CapacityError, Figure, LayerKind, LayerList, MAX_ANNOTATIONS, MAX_FUNCTIONS, MAX_POINT_SETS,
    MAX_SEGMENT_SETS,
};
pub use grid::{
    AxisLine, GridLayout, GridLine, MAX_LINES_PER_AXIS, TickLabel, format_tick, is_major, steps,
};
pub use ids::MarkIds;
pub use layers::{
    Annotation, AnnotationId, DomainRestriction, EndpointDisplay, EndpointStyle, FunctionLayer,
    PointSet, SegmentSet,
};
pub use overlay::{point_set_marks, segment_set_marks};
pub use parse::{numbers, parse_points, parse_segments};
pub use renderer::Renderer;
pub use tracer::{
    EndpointMarker, JUMP_FACTOR, MAX_SAMPLES, MIN_SAMPLE_BASE, MIN_SAMPLES, Trace, sample_count,
    trace_function, trace_interval,
};
