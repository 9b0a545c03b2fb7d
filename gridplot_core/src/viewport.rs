// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport configuration and the graph/device coordinate mapper.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Point, Rect};

use crate::error::{Axis, RenderError, StepKind};
use crate::scale::ScaleLinear;

/// Fraction of the canvas size reserved as margin on every side of the plot.
pub const PAD_FRACTION: f64 = 0.08;

/// The visible graph-space rectangle plus grid and label density settings.
///
/// Callers mutate this between renders; a render treats it as an immutable snapshot.
/// [`Viewport::validate`] must pass before anything is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge in graph units.
    pub xmin: f64,
    /// Right edge in graph units.
    pub xmax: f64,
    /// Bottom edge in graph units.
    pub ymin: f64,
    /// Top edge in graph units.
    pub ymax: f64,
    /// Spacing between gridlines.
    pub minor_step: f64,
    /// Gridlines on multiples of this are drawn heavier.
    pub major_step: f64,
    /// Spacing between numeric tick labels.
    pub label_step: f64,
    /// Suppress the `0` tick label on both axes.
    pub hide_zero_label: bool,
    /// Draw the `x = 0` and `y = 0` axis lines (when zero is in range).
    pub show_axes: bool,
    /// Draw a rectangle around the inner plot area.
    pub show_border: bool,
    /// Width and height of the square canvas in device units.
    pub canvas_size: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            xmin: -10.0,
            xmax: 10.0,
            ymin: -10.0,
            ymax: 10.0,
            minor_step: 1.0,
            major_step: 5.0,
            label_step: 2.0,
            hide_zero_label: true,
            show_axes: true,
            show_border: true,
            canvas_size: 760.0,
        }
    }
}

impl Viewport {
    /// Sets the x range.
    pub fn with_x_range(mut self, xmin: f64, xmax: f64) -> Self {
        self.xmin = xmin;
        self.xmax = xmax;
        self
    }

    /// Sets the y range.
    pub fn with_y_range(mut self, ymin: f64, ymax: f64) -> Self {
        self.ymin = ymin;
        self.ymax = ymax;
        self
    }

    /// Sets minor, major and label steps.
    pub fn with_steps(mut self, minor: f64, major: f64, label: f64) -> Self {
        self.minor_step = minor;
        self.major_step = major;
        self.label_step = label;
        self
    }

    /// Sets whether the zero tick label is hidden.
    pub fn with_hide_zero_label(mut self, hide: bool) -> Self {
        self.hide_zero_label = hide;
        self
    }

    /// Sets whether axis lines are drawn.
    pub fn with_axes(mut self, show: bool) -> Self {
        self.show_axes = show;
        self
    }

    /// Sets whether the plot border is drawn.
    pub fn with_border(mut self, show: bool) -> Self {
        self.show_border = show;
        self
    }

    /// Sets the canvas size.
    pub fn with_canvas_size(mut self, canvas_size: f64) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    /// Checks the geometric invariants: `xmax > xmin`, `ymax > ymin`, every step `> 0`,
    /// and a positive finite canvas size.
    ///
    /// The comparisons are written so that `NaN` fails them.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !(self.xmax > self.xmin) {
            return Err(RenderError::InvalidRange {
                axis: Axis::X,
                min: self.xmin,
                max: self.xmax,
            });
        }
        if !(self.ymax > self.ymin) {
            return Err(RenderError::InvalidRange {
                axis: Axis::Y,
                min: self.ymin,
                max: self.ymax,
            });
        }
        for (step, value) in [
            (StepKind::Minor, self.minor_step),
            (StepKind::Major, self.major_step),
            (StepKind::Label, self.label_step),
        ] {
            if !(value > 0.0) {
                return Err(RenderError::NonPositiveStep { step, value });
            }
        }
        if !(self.canvas_size > 0.0) || !self.canvas_size.is_finite() {
            return Err(RenderError::InvalidCanvasSize(self.canvas_size));
        }
        Ok(())
    }

    /// Width of the visible x range.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Height of the visible y range.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Center of the visible rectangle in graph space.
    pub fn center(&self) -> Point {
        Point::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// Whether `y` lies in the closed visible y range.
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.ymin && y <= self.ymax
    }

    /// Whether `x = 0` is inside the visible x range.
    pub fn x_contains_zero(&self) -> bool {
        0.0 >= self.xmin && 0.0 <= self.xmax
    }

    /// Whether `y = 0` is inside the visible y range.
    pub fn y_contains_zero(&self) -> bool {
        self.contains_y(0.0)
    }
}

/// Bidirectional affine transform between graph space and device space.
///
/// Device space reserves a pad of `round(canvas_size * PAD_FRACTION)` on every side; the
/// remaining square ("inner") receives the viewport with graph x increasing to the right and
/// graph y increasing upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mapper {
    pad: f64,
    inner: f64,
    canvas_size: f64,
    x: ScaleLinear,
    y: ScaleLinear,
}

impl Mapper {
    /// Creates the mapper for a viewport snapshot.
    ///
    /// The viewport is expected to have passed [`Viewport::validate`]; a degenerate range maps
    /// to the edge of the plot instead of dividing by zero.
    pub fn new(viewport: &Viewport) -> Self {
        let size = viewport.canvas_size;
        let pad = (size * PAD_FRACTION).round();
        let inner = size - pad * 2.0;
        Self {
            pad,
            inner,
            canvas_size: size,
            x: ScaleLinear::new((viewport.xmin, viewport.xmax), (pad, pad + inner)),
            y: ScaleLinear::new((viewport.ymin, viewport.ymax), (pad + inner, pad)),
        }
    }

    /// Margin on each side of the inner plot square.
    pub fn pad(&self) -> f64 {
        self.pad
    }

    /// Side length of the inner plot square.
    pub fn inner(&self) -> f64 {
        self.inner
    }

    /// Side length of the whole canvas.
    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    /// The inner plot square in device space. This is also the clip region.
    pub fn plot_rect(&self) -> Rect {
        Rect::new(
            self.pad,
            self.pad,
            self.pad + self.inner,
            self.pad + self.inner,
        )
    }

    /// Maps a graph x coordinate to device x.
    pub fn x(&self, x: f64) -> f64 {
        self.x.map(x)
    }

    /// Maps a graph y coordinate to device y.
    pub fn y(&self, y: f64) -> f64 {
        self.y.map(y)
    }

    /// Maps a graph-space point into device space.
    pub fn to_device(&self, p: Point) -> Point {
        Point::new(self.x.map(p.x), self.y.map(p.y))
    }

    /// Maps a device-space point back into graph space.
    pub fn to_graph(&self, p: Point) -> Point {
        Point::new(self.x.invert(p.x), self.y.invert(p.y))
    }
}
