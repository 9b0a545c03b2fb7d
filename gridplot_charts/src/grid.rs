// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid, axis, border and tick label layout.
//!
//! Layout is split from mark generation: [`GridLayout::new`] computes positions only, and the
//! `*_marks` methods turn them into styled marks. Tests can check geometry without caring
//! about paint.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use gridplot_core::{Axis, Mapper, Mark, Shape, Style, TextAnchor, TextSpec, Viewport};
use kurbo::{Line, Point, Rect};

use crate::ids::MarkIds;

/// Upper bound on gridlines (or labels) per direction.
pub const MAX_LINES_PER_AXIS: usize = 10_000;

/// Slack allowed past the range end when stepping.
const STEP_EPSILON: f64 = 1e-9;
/// Tolerance for "is a multiple of the major step".
const MAJOR_EPSILON: f64 = 1e-9;
/// Values closer to zero than this count as the zero label.
const ZERO_LABEL_EPSILON: f64 = 1e-12;

const MINOR_WIDTH_FACTOR: f64 = 0.6;
const MAJOR_WIDTH_FACTOR: f64 = 1.2;
const AXIS_WIDTH_FACTOR: f64 = 2.2;
const MINOR_OPACITY: f64 = 0.35;
const MAJOR_OPACITY: f64 = 0.9;

/// Gap between the x axis and the top of its labels' baseline box.
const X_LABEL_GAP: f64 = 6.0;
/// Gap between the y axis and the end of its labels.
const Y_LABEL_GAP: f64 = 8.0;

/// One gridline.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLine {
    /// Graph-space coordinate (x for vertical lines, y for horizontal).
    pub value: f64,
    /// Whether `value` is a multiple of the major step.
    pub major: bool,
    /// Device-space geometry spanning the plot area.
    pub line: Line,
}

/// An axis line through graph zero.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLine {
    /// Which axis this is (`X` is the horizontal `y = 0` line).
    pub axis: Axis,
    /// Device-space geometry.
    pub line: Line,
}

/// A numeric tick label.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    /// The tick value.
    pub value: f64,
    /// Formatted value.
    pub text: String,
    /// Device-space anchor (alphabetic baseline).
    pub pos: Point,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
}

/// Positions of every guide element for one viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Vertical gridlines, left to right.
    pub vertical: Vec<GridLine>,
    /// Horizontal gridlines, bottom to top.
    pub horizontal: Vec<GridLine>,
    /// Axis lines (zero, one or two).
    pub axes: Vec<AxisLine>,
    /// The plot border, if enabled.
    pub border: Option<Rect>,
    /// Labels under the x axis (or the bottom edge).
    pub x_labels: Vec<TickLabel>,
    /// Labels left of the y axis (or the left edge).
    pub y_labels: Vec<TickLabel>,
}

impl GridLayout {
    /// Lays out gridlines, axes, border and labels for `viewport`.
    ///
    /// `font_size` positions the labels relative to their axis.
    pub fn new(viewport: &Viewport, mapper: &Mapper, font_size: f64) -> Self {
        let vp = viewport;
        let (top, bottom) = (mapper.y(vp.ymax), mapper.y(vp.ymin));
        let (left, right) = (mapper.x(vp.xmin), mapper.x(vp.xmax));

        let vertical = steps(vp.xmin, vp.xmax, vp.minor_step)
            .map(|x| GridLine {
                value: x,
                major: is_major(x, vp.major_step),
                line: Line::new((mapper.x(x), bottom), (mapper.x(x), top)),
            })
            .collect();
        let horizontal = steps(vp.ymin, vp.ymax, vp.minor_step)
            .map(|y| GridLine {
                value: y,
                major: is_major(y, vp.major_step),
                line: Line::new((left, mapper.y(y)), (right, mapper.y(y))),
            })
            .collect();

        let mut axes = Vec::new();
        if vp.show_axes {
            if vp.x_contains_zero() {
                axes.push(AxisLine {
                    axis: Axis::Y,
                    line: Line::new((mapper.x(0.0), bottom), (mapper.x(0.0), top)),
                });
            }
            if vp.y_contains_zero() {
                axes.push(AxisLine {
                    axis: Axis::X,
                    line: Line::new((left, mapper.y(0.0)), (right, mapper.y(0.0))),
                });
            }
        }

        let border = vp.show_border.then(|| mapper.plot_rect());

        // Labels hug the axis when it is drawn, otherwise the bottom/left edge.
        let x_label_y = if vp.show_axes && vp.y_contains_zero() {
            mapper.y(0.0)
        } else {
            bottom
        };
        let y_label_x = if vp.show_axes && vp.x_contains_zero() {
            mapper.x(0.0)
        } else {
            left
        };

        let keep = |v: &f64| !(vp.hide_zero_label && v.abs() < ZERO_LABEL_EPSILON);
        let x_labels = steps(vp.xmin, vp.xmax, vp.label_step)
            .filter(keep)
            .map(|x| TickLabel {
                value: x,
                text: format_tick(x),
                pos: Point::new(mapper.x(x), x_label_y + font_size + X_LABEL_GAP),
                anchor: TextAnchor::Middle,
            })
            .collect();
        let y_labels = steps(vp.ymin, vp.ymax, vp.label_step)
            .filter(keep)
            .map(|y| TickLabel {
                value: y,
                text: format_tick(y),
                pos: Point::new(y_label_x - Y_LABEL_GAP, mapper.y(y) + font_size / 2.0 - 2.0),
                anchor: TextAnchor::End,
            })
            .collect();

        Self {
            vertical,
            horizontal,
            axes,
            border,
            x_labels,
            y_labels,
        }
    }

    /// Gridline marks: vertical then horizontal, majors heavier and more opaque.
    pub fn grid_marks(&self, style: &Style, ids: &mut MarkIds) -> Vec<Mark> {
        self.vertical
            .iter()
            .chain(&self.horizontal)
            .map(|g| {
                let (factor, opacity) = if g.major {
                    (MAJOR_WIDTH_FACTOR, MAJOR_OPACITY)
                } else {
                    (MINOR_WIDTH_FACTOR, MINOR_OPACITY)
                };
                Mark::new(ids.next_id(), Shape::Line(g.line))
                    .with_stroke(style.stroke, style.stroke_width * factor)
                    .with_opacity(opacity)
            })
            .collect()
    }

    /// Axis line marks, heavier than major gridlines.
    pub fn axis_marks(&self, style: &Style, ids: &mut MarkIds) -> Vec<Mark> {
        self.axes
            .iter()
            .map(|a| {
                Mark::new(ids.next_id(), Shape::Line(a.line))
                    .with_stroke(style.stroke, style.stroke_width * AXIS_WIDTH_FACTOR)
            })
            .collect()
    }

    /// The unfilled border rectangle, if enabled.
    pub fn border_marks(&self, style: &Style, ids: &mut MarkIds) -> Vec<Mark> {
        self.border
            .iter()
            .map(|r| {
                Mark::new(ids.next_id(), Shape::Rect(*r))
                    .with_stroke(style.stroke, style.stroke_width)
            })
            .collect()
    }

    /// Tick label marks: x labels then y labels.
    pub fn label_marks(&self, style: &Style, ids: &mut MarkIds) -> Vec<Mark> {
        self.x_labels
            .iter()
            .chain(&self.y_labels)
            .map(|l| {
                let text = TextSpec::new(
                    l.pos,
                    l.text.clone(),
                    style.font_family.clone(),
                    style.font_size,
                )
                .with_anchor(l.anchor);
                Mark::new(ids.next_id(), Shape::Text(text)).with_fill(style.stroke)
            })
            .collect()
    }
}

/// Multiples of `step` from the first one `>= min` through `max` (plus a small epsilon).
///
/// Values are computed as `start + i * step` so long runs do not drift. At most
/// [`MAX_LINES_PER_AXIS`] values are produced.
pub fn steps(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let start = (min / step).ceil() * step;
    let span = ((max + STEP_EPSILON - start) / step).floor();
    let count = if span.is_finite() && span >= 0.0 {
        let wanted = span + 1.0;
        if wanted > MAX_LINES_PER_AXIS as f64 {
            tracing::warn!(min, max, step, "gridline count capped at {MAX_LINES_PER_AXIS}");
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "finite, non-negative and capped above"
        )]
        let count = wanted.min(MAX_LINES_PER_AXIS as f64) as usize;
        count
    } else {
        0
    };
    (0..count).map(move |i| start + step * i as f64)
}

/// Whether `v` is (within floating-point noise) a multiple of `major_step`.
pub fn is_major(v: f64, major_step: f64) -> bool {
    let q = v / major_step;
    (q - q.round()).abs() < MAJOR_EPSILON
}

/// Shortest decimal form of a tick value: ten fractional digits, then trailing zeros and a
/// trailing decimal point stripped. Negative zero prints as `0`.
pub fn format_tick(v: f64) -> String {
    let s = format!("{v:.10}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        String::from("0")
    } else {
        String::from(trimmed)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn layout(vp: &Viewport) -> GridLayout {
        GridLayout::new(vp, &Mapper::new(vp), 14.0)
    }

    #[test]
    fn twenty_one_vertical_lines_with_five_majors() {
        let vp = Viewport::default().with_steps(1.0, 5.0, 2.0);
        let g = layout(&vp);
        assert_eq!(g.vertical.len(), 21);
        let majors: std::vec::Vec<f64> = g
            .vertical
            .iter()
            .filter(|l| l.major)
            .map(|l| l.value)
            .collect();
        assert_eq!(majors, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
        assert_eq!(g.horizontal.len(), 21);
    }

    #[test]
    fn first_line_is_first_multiple_at_or_above_min() {
        let vp = Viewport::default()
            .with_x_range(-2.5, 3.2)
            .with_steps(1.0, 5.0, 2.0);
        let g = layout(&vp);
        let xs: std::vec::Vec<f64> = g.vertical.iter().map(|l| l.value).collect();
        assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn fractional_steps_reach_the_range_end() {
        let v: std::vec::Vec<f64> = steps(0.0, 1.0, 0.1).collect();
        assert_eq!(v.len(), 11);
        assert!((v[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn huge_line_counts_are_capped() {
        assert_eq!(steps(0.0, 1.0e9, 1.0).count(), MAX_LINES_PER_AXIS);
    }

    #[test]
    fn gridlines_span_the_plot_rect() {
        let vp = Viewport::default();
        let m = Mapper::new(&vp);
        let g = GridLayout::new(&vp, &m, 14.0);
        let r = m.plot_rect();
        for l in &g.vertical {
            assert!((l.line.p0.y - r.y1).abs() < 1e-9 && (l.line.p1.y - r.y0).abs() < 1e-9);
        }
        for l in &g.horizontal {
            assert!((l.line.p0.x - r.x0).abs() < 1e-9 && (l.line.p1.x - r.x1).abs() < 1e-9);
        }
    }

    #[test]
    fn axes_only_when_zero_is_in_range() {
        let both = layout(&Viewport::default());
        assert_eq!(both.axes.len(), 2);

        let no_y_axis = layout(&Viewport::default().with_x_range(1.0, 9.0));
        assert_eq!(no_y_axis.axes.len(), 1);
        assert_eq!(no_y_axis.axes[0].axis, Axis::X);

        let hidden = layout(&Viewport::default().with_axes(false));
        assert!(hidden.axes.is_empty());
    }

    #[test]
    fn zero_label_is_suppressed_on_both_axes() {
        let g = layout(&Viewport::default().with_hide_zero_label(true));
        assert!(g.x_labels.iter().all(|l| l.value != 0.0 && l.text != "0"));
        assert!(g.y_labels.iter().all(|l| l.value != 0.0 && l.text != "0"));
        assert_eq!(g.x_labels.len(), 10);

        let shown = layout(&Viewport::default().with_hide_zero_label(false));
        assert!(shown.x_labels.iter().any(|l| l.text == "0"));
        assert!(shown.y_labels.iter().any(|l| l.text == "0"));
    }

    #[test]
    fn labels_anchor_against_axes_or_edges() {
        let vp = Viewport::default();
        let m = Mapper::new(&vp);
        let g = GridLayout::new(&vp, &m, 14.0);
        let x_label = &g.x_labels[0];
        assert_eq!(x_label.anchor, TextAnchor::Middle);
        assert!((x_label.pos.y - (m.y(0.0) + 14.0 + 6.0)).abs() < 1e-9);
        let y_label = &g.y_labels[0];
        assert_eq!(y_label.anchor, TextAnchor::End);
        assert!((y_label.pos.x - (m.x(0.0) - 8.0)).abs() < 1e-9);

        // Zero out of range: labels fall back to the plot edges.
        let vp = Viewport::default().with_x_range(2.0, 12.0).with_y_range(3.0, 13.0);
        let m = Mapper::new(&vp);
        let g = GridLayout::new(&vp, &m, 14.0);
        assert!((g.x_labels[0].pos.y - (m.y(3.0) + 20.0)).abs() < 1e-9);
        assert!((g.y_labels[0].pos.x - (m.x(2.0) - 8.0)).abs() < 1e-9);
    }

    #[test]
    fn major_lines_are_heavier_than_minor_and_axes_heavier_still() {
        let vp = Viewport::default();
        let g = layout(&vp);
        let style = Style::default();
        let mut ids = MarkIds::new();
        let grid = g.grid_marks(&style, &mut ids);
        let axes = g.axis_marks(&style, &mut ids);
        let width = |m: &Mark| m.stroke.as_ref().map(|s| s.stroke_width).unwrap_or(0.0);
        let major = grid.iter().zip(g.vertical.iter()).find(|(_, l)| l.major).unwrap().0;
        let minor = grid.iter().zip(g.vertical.iter()).find(|(_, l)| !l.major).unwrap().0;
        assert!(width(major) > width(minor));
        assert!(major.opacity > minor.opacity);
        assert!(axes.iter().all(|a| width(a) > width(major)));
    }

    #[test]
    fn tick_format_is_shortest_decimal() {
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(-10.0), "-10");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(0.1 + 0.2), "0.3");
        assert_eq!(format_tick(100.0), "100");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(-1e-13), "0");
    }
}
