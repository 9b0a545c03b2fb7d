// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sampling `y = f(x)` into a polyline with pen lifts.
//!
//! The tracer walks the visible (or restricted) x interval at a fixed step. A sample puts the
//! pen down only if it is finite and inside `[ymin, ymax]`; anything else lifts the pen so the
//! next in-range sample starts a new subpath. A second rule lifts the pen when consecutive
//! in-range values differ by more than `2.5 * (ymax - ymin)`. Since in-range values can never
//! be that far apart, it only matters if the range test is ever relaxed.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use gridplot_core::{CompiledExpr, Mapper, Mark, Shape, Style, Viewport};
use kurbo::{BezPath, Circle, Point};

use crate::ids::MarkIds;
use crate::layers::{EndpointStyle, FunctionLayer};

/// Lower bound on the per-interval sample count.
pub const MIN_SAMPLES: usize = 140;
/// Upper bound on the per-interval sample count.
pub const MAX_SAMPLES: usize = 100_000;
/// Smallest plot size used as the sampling base, in device units.
pub const MIN_SAMPLE_BASE: f64 = 250.0;
/// Jumps larger than this multiple of the y span lift the pen.
pub const JUMP_FACTOR: f64 = 2.5;

/// The x interval a layer is traced over: the viewport's x range, intersected with the
/// layer's domain restriction if it has one.
///
/// Returns `None` when the intersection is empty, in which case the layer draws nothing and
/// its expression is not compiled.
pub fn trace_interval(layer: &FunctionLayer, viewport: &Viewport) -> Option<(f64, f64)> {
    let (start, end) = match layer.domain {
        Some(d) => {
            let (lo, hi) = d.ordered();
            (viewport.xmin.max(lo), viewport.xmax.min(hi))
        }
        None => (viewport.xmin, viewport.xmax),
    };
    (end > start).then_some((start, end))
}

/// Number of samples for an interval covering `domain_fraction` of the viewport width.
pub fn sample_count(inner: f64, samples_per_pixel: f64, domain_fraction: f64) -> usize {
    let wanted = (inner.max(MIN_SAMPLE_BASE) * samples_per_pixel * domain_fraction).floor();
    if !(wanted >= MIN_SAMPLES as f64) {
        return MIN_SAMPLES;
    }
    if wanted > MAX_SAMPLES as f64 {
        tracing::warn!(wanted, "sample count capped at {MAX_SAMPLES}");
        return MAX_SAMPLES;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "bounded by MIN_SAMPLES and MAX_SAMPLES"
    )]
    let n = wanted as usize;
    n
}

/// A marker at one end of a restricted domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndpointMarker {
    /// Device-space center.
    pub center: Point,
    /// Open or closed.
    pub style: EndpointStyle,
}

/// The result of tracing one function layer.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    /// Device-space polyline; one subpath per pen-down run.
    pub path: BezPath,
    /// Number of subpaths in `path`.
    pub runs: usize,
    /// Samples evaluated (endpoint probes excluded).
    pub samples: usize,
    /// Endpoint markers, left first.
    pub markers: Vec<EndpointMarker>,
}

impl Trace {
    /// Whether nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.runs == 0 && self.markers.is_empty()
    }

    /// The curve mark (if any run was drawn) followed by the endpoint markers.
    pub fn marks(&self, layer: &FunctionLayer, style: &Style, ids: &mut MarkIds) -> Vec<Mark> {
        let mut marks = Vec::with_capacity(1 + self.markers.len());
        if self.runs > 0 {
            marks.push(
                Mark::new(ids.next_id(), Shape::Path(self.path.clone()))
                    .with_stroke(layer.color, layer.width),
            );
        }
        let marker_stroke = layer.width.clamp(1.0, 8.0);
        for m in &self.markers {
            let circle = Shape::Circle(Circle::new(m.center, layer.endpoints.radius));
            let fill = match m.style {
                EndpointStyle::Open => style.background,
                EndpointStyle::Closed | EndpointStyle::None => layer.color,
            };
            marks.push(
                Mark::new(ids.next_id(), circle)
                    .with_fill(fill)
                    .with_stroke(layer.color, marker_stroke),
            );
        }
        marks
    }
}

/// Samples `f` over `interval` and builds the device-space trace.
///
/// Evaluation errors and non-finite results are treated as out-of-range samples.
pub fn trace_function<F>(
    f: &F,
    layer: &FunctionLayer,
    interval: (f64, f64),
    viewport: &Viewport,
    mapper: &Mapper,
) -> Trace
where
    F: CompiledExpr + ?Sized,
{
    let (x_start, x_end) = interval;
    let width = x_end - x_start;
    let samples = sample_count(
        mapper.inner(),
        layer.samples_per_pixel,
        width / viewport.width(),
    );
    let dx = width / (samples - 1) as f64;
    let threshold = viewport.height() * JUMP_FACTOR;

    let mut path = BezPath::new();
    let mut runs = 0;
    let mut pen_down = false;
    let mut prev: Option<f64> = None;

    for i in 0..samples {
        let x = x_start + i as f64 * dx;
        let y = f.eval(x).unwrap_or(f64::NAN);
        let in_range = viewport.contains_y(y);
        let big_jump = in_range && prev.is_some_and(|p| (y - p).abs() > threshold);
        if !in_range || big_jump {
            pen_down = false;
            prev = in_range.then_some(y);
            continue;
        }
        let p = mapper.to_device(Point::new(x, y));
        if pen_down {
            path.line_to(p);
        } else {
            path.move_to(p);
            runs += 1;
        }
        pen_down = true;
        prev = Some(y);
    }

    let mut markers = Vec::new();
    if layer.domain.is_some() && layer.endpoints.show {
        let ends = [
            (x_start, layer.endpoints.left),
            (x_end, layer.endpoints.right),
        ];
        for (x, style) in ends {
            if style == EndpointStyle::None {
                continue;
            }
            let y = f.eval(x).unwrap_or(f64::NAN);
            if viewport.contains_y(y) {
                markers.push(EndpointMarker {
                    center: mapper.to_device(Point::new(x, y)),
                    style,
                });
            }
        }
    }

    tracing::trace!(samples, runs, markers = markers.len(), "traced function");
    Trace {
        path,
        runs,
        samples,
        markers,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use gridplot_core::EvalError;

    use super::*;

    fn run(
        f: impl Fn(f64) -> Result<f64, EvalError>,
        layer: &FunctionLayer,
        vp: &Viewport,
    ) -> Option<Trace> {
        let interval = trace_interval(layer, vp)?;
        Some(trace_function(&f, layer, interval, vp, &Mapper::new(vp)))
    }

    #[test]
    fn sample_count_floor_and_base() {
        assert_eq!(sample_count(100.0, 0.1, 1.0), MIN_SAMPLES);
        // inner below 250 samples as if it were 250.
        assert_eq!(sample_count(100.0, 1.0, 1.0), 250);
        assert_eq!(sample_count(638.0, 1.5, 1.0), 957);
        assert_eq!(sample_count(638.0, 1.5, 0.5), 478);
        assert_eq!(sample_count(638.0, f64::NAN, 1.0), MIN_SAMPLES);
        assert_eq!(sample_count(638.0, 1e12, 1.0), MAX_SAMPLES);
    }

    #[test]
    fn straight_line_is_one_run() {
        let vp = Viewport::default();
        let t = run(|x: f64| -> Result<f64, EvalError> { Ok(x) }, &FunctionLayer::new("x"), &vp)
            .unwrap();
        assert_eq!(t.runs, 1);
        assert_eq!(t.samples, 957);
        assert!(t.markers.is_empty());
    }

    #[test]
    fn reciprocal_splits_at_the_pole() {
        let vp = Viewport::default();
        let t = run(
            |x: f64| -> Result<f64, EvalError> { Ok(1.0 / x) },
            &FunctionLayer::new("1/x"),
            &vp,
        )
        .unwrap();
        assert!(t.runs >= 2, "got {} runs", t.runs);
    }

    #[test]
    fn errors_and_nan_lift_the_pen() {
        let vp = Viewport::default();
        let f = |x: f64| -> Result<f64, EvalError> {
            if x.abs() < 1.0 {
                Err(EvalError(std::string::String::from("hole")))
            } else if x > 5.0 {
                Ok(f64::NAN)
            } else {
                Ok(0.0)
            }
        };
        let t = run(f, &FunctionLayer::new("f"), &vp).unwrap();
        assert_eq!(t.runs, 2);
    }

    #[test]
    fn entirely_out_of_range_draws_nothing() {
        let vp = Viewport::default();
        let t = run(
            |_: f64| -> Result<f64, EvalError> { Ok(100.0) },
            &FunctionLayer::new("100"),
            &vp,
        )
        .unwrap();
        assert!(t.is_empty());
        let mut ids = MarkIds::new();
        assert!(t.marks(&FunctionLayer::new("100"), &Style::default(), &mut ids).is_empty());
    }

    #[test]
    fn restricted_domain_is_clipped_to_viewport_and_reversible() {
        let vp = Viewport::default();
        let layer = FunctionLayer::new("x").with_domain(20.0, -3.0);
        assert_eq!(trace_interval(&layer, &vp), Some((-3.0, 10.0)));

        let outside = FunctionLayer::new("x").with_domain(11.0, 12.0);
        assert_eq!(trace_interval(&outside, &vp), None);
    }

    #[test]
    fn closed_endpoints_at_mapped_domain_ends() {
        let vp = Viewport::default();
        let m = Mapper::new(&vp);
        let layer = FunctionLayer::new("x").with_domain(-5.0, 5.0);
        let t = run(|x: f64| -> Result<f64, EvalError> { Ok(x) }, &layer, &vp).unwrap();
        assert_eq!(t.markers.len(), 2);
        assert_eq!(t.markers[0].center, m.to_device(Point::new(-5.0, -5.0)));
        assert_eq!(t.markers[1].center, m.to_device(Point::new(5.0, 5.0)));
        assert!(t.markers.iter().all(|e| e.style == EndpointStyle::Closed));

        let marks = t.marks(&layer, &Style::default(), &mut MarkIds::new());
        assert_eq!(marks.len(), 3);
        assert!(matches!(marks[0].shape, Shape::Path(_)));
        assert!(marks[1..].iter().all(|mk| mk.fill.is_some()));
    }

    #[test]
    fn open_endpoints_use_background_fill_and_none_is_skipped() {
        let vp = Viewport::default();
        let layer = FunctionLayer::new("x")
            .with_domain(-5.0, 5.0)
            .with_endpoints(EndpointStyle::Open, EndpointStyle::None);
        let t = run(|x: f64| -> Result<f64, EvalError> { Ok(x) }, &layer, &vp).unwrap();
        assert_eq!(t.markers.len(), 1);
        let style = Style::default();
        let marks = t.marks(&layer, &style, &mut MarkIds::new());
        assert_eq!(marks[1].fill, Some(style.background.into()));
    }

    #[test]
    fn endpoint_outside_y_range_is_dropped() {
        let vp = Viewport::default();
        let layer = FunctionLayer::new("x^2").with_domain(-5.0, 1.0);
        let t = run(|x: f64| -> Result<f64, EvalError> { Ok(x * x) }, &layer, &vp).unwrap();
        assert_eq!(t.markers.len(), 1);
    }
}
