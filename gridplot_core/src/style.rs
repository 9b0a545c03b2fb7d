// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared figure styling.

use alloc::sync::Arc;

use peniko::color::palette::css;
use peniko::{Brush, Color};

/// A paint + width pair for stroked shapes (gridlines, axes, curves, segments).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in device units.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Figure-wide styling: grid/axis stroke, background, and label font.
///
/// Read-only for the duration of a render.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Color of gridlines, axes, border and tick labels.
    pub stroke: Color,
    /// Base stroke width; gridlines and axes scale from it.
    pub stroke_width: f64,
    /// Canvas background. Open endpoint markers are filled with it too.
    pub background: Color,
    /// CSS font family list used for tick labels and annotations.
    pub font_family: Arc<str>,
    /// Tick label font size.
    pub font_size: f64,
}

impl Style {
    /// Sets the grid/axis stroke color.
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the base stroke width.
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets the font family list.
    pub fn with_font_family(mut self, font_family: impl Into<Arc<str>>) -> Self {
        self.font_family = font_family.into();
        self
    }

    /// Sets the tick label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: css::BLACK,
            stroke_width: 1.5,
            background: css::WHITE,
            font_family: Arc::from("Arial, system-ui, sans-serif"),
            font_size: 14.0,
        }
    }
}
