// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order of the document layers, bottom to top.
//!
//! [`crate::Document`] sorts its layers by these values, so the compositor can build them in
//! any order and still get a deterministic paint order.

/// Canvas background fill.
pub const BACKGROUND: i32 = -100;
/// Minor and major gridlines.
pub const GRID_LINES: i32 = -50;

/// Segments, function curves and point sets (clipped to the plot).
pub const DATA: i32 = 0;

/// Axis lines at `x = 0` and `y = 0`.
pub const AXIS_RULES: i32 = 30;
/// Plot border rectangle.
pub const BORDER: i32 = 35;
/// Numeric tick labels.
pub const AXIS_LABELS: i32 = 40;

/// Annotations flagged `clip_to_plot`.
pub const CLIPPED_ANNOTATIONS: i32 = 80;
/// Annotations drawn anywhere on the canvas.
pub const FREE_ANNOTATIONS: i32 = 90;
