// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use gridplot_core::{
    Axis, CompileError, Document, EvalError, LayerRole, Mapper, RenderError, Shape, SharedExpr,
    StepKind, Viewport,
};
use kurbo::{PathEl, Point};
use peniko::color::palette::css;

use crate::{
    EndpointStyle, ExpressionCache, Figure, FunctionLayer, PointSet, Renderer, SegmentSet,
    compose,
};

/// Understands the handful of expressions these tests use.
fn toy_compile(src: &str) -> Result<SharedExpr, CompileError> {
    let f: SharedExpr = match src {
        "x" => Arc::new(|x: f64| -> Result<f64, EvalError> { Ok(x) }),
        "1/x" => Arc::new(|x: f64| -> Result<f64, EvalError> { Ok(1.0 / x) }),
        "2*x + 3" => Arc::new(|x: f64| -> Result<f64, EvalError> { Ok(2.0 * x + 3.0) }),
        "x^2 - 4" => Arc::new(|x: f64| -> Result<f64, EvalError> { Ok(x * x - 4.0) }),
        _ => return Err(CompileError::new(std::format!("unknown expression `{src}`"))),
    };
    Ok(f)
}

fn render(figure: &Figure) -> Result<Document, RenderError> {
    compose(figure, toy_compile)
}

fn subpath_count(doc: &Document) -> usize {
    doc.marks_in(LayerRole::Data)
        .filter_map(|m| match &m.shape {
            Shape::Path(p) => Some(p),
            _ => None,
        })
        .flat_map(|p| p.elements().iter())
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count()
}

#[test]
fn layers_follow_the_fixed_paint_order() {
    let doc = render(&Figure::default()).unwrap();
    let roles: Vec<LayerRole> = doc.layers().iter().map(|l| l.role).collect();
    assert_eq!(roles, LayerRole::ALL);
    assert_eq!(doc.size(), 760.0);
    assert_eq!(doc.clip(), Mapper::new(&Viewport::default()).plot_rect());

    let clipped: Vec<LayerRole> = doc
        .layers()
        .iter()
        .filter(|l| l.is_clipped())
        .map(|l| l.role)
        .collect();
    assert_eq!(
        clipped,
        [LayerRole::Data, LayerRole::ClippedAnnotations],
        "axes, border and labels must never be clipped"
    );
}

#[test]
fn default_grid_has_21_lines_each_way() {
    let doc = render(&Figure::default()).unwrap();
    assert_eq!(doc.marks_in(LayerRole::Grid).count(), 42);
    assert_eq!(doc.marks_in(LayerRole::Axes).count(), 2);
    assert_eq!(doc.marks_in(LayerRole::Border).count(), 1);
}

#[test]
fn hidden_zero_label_on_both_axes() {
    let doc = render(&Figure::default()).unwrap();
    let texts: Vec<&str> = doc
        .marks_in(LayerRole::Labels)
        .filter_map(|m| m.text())
        .map(|t| t.text.as_str())
        .collect();
    assert!(!texts.contains(&"0"));
    // -10..10 every 2, minus zero, on two axes.
    assert_eq!(texts.len(), 20);
}

#[test]
fn reciprocal_curve_breaks_across_the_asymptote() {
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("y = 1/x")).unwrap();
    let doc = render(&fig).unwrap();
    assert!(subpath_count(&doc) >= 2);
    assert_eq!(
        doc.marks_in(LayerRole::Data)
            .filter(|m| matches!(m.shape, Shape::Path(_)))
            .count(),
        1,
        "one path per function layer"
    );
}

#[test]
fn restricted_line_gets_exactly_two_closed_markers() {
    let mut fig = Figure::default();
    fig.add_function(
        FunctionLayer::new("x")
            .with_domain(-5.0, 5.0)
            .with_endpoints(EndpointStyle::Closed, EndpointStyle::Closed),
    )
    .unwrap();
    let doc = render(&fig).unwrap();
    let m = Mapper::new(&fig.viewport);
    let circles: Vec<Point> = doc
        .marks_in(LayerRole::Data)
        .filter_map(|mk| match &mk.shape {
            Shape::Circle(c) if mk.fill.is_some() => Some(c.center),
            _ => None,
        })
        .collect();
    assert_eq!(
        circles,
        [
            m.to_device(Point::new(-5.0, -5.0)),
            m.to_device(Point::new(5.0, 5.0))
        ]
    );
}

#[test]
fn point_text_parses_tolerantly() {
    let mut fig = Figure::default();
    fig.add_point_set(PointSet::new("(-6, 2)\nbad line\n(3,-4)"))
        .unwrap();
    let doc = render(&fig).unwrap();
    let m = Mapper::new(&fig.viewport);
    let dots: Vec<Point> = doc
        .marks_in(LayerRole::Data)
        .filter_map(|mk| match &mk.shape {
            Shape::Circle(c) => Some(c.center),
            _ => None,
        })
        .collect();
    assert_eq!(
        dots,
        [
            m.to_device(Point::new(-6.0, 2.0)),
            m.to_device(Point::new(3.0, -4.0))
        ]
    );
}

#[test]
fn data_layer_stacks_segments_then_functions_then_points() {
    let mut fig = Figure::default();
    fig.add_point_set(PointSet::new("1 1")).unwrap();
    fig.add_function(FunctionLayer::new("x")).unwrap();
    fig.add_segment_set(SegmentSet::new("0 0 1 1")).unwrap();
    let doc = render(&fig).unwrap();
    let kinds: Vec<&str> = doc
        .marks_in(LayerRole::Data)
        .map(|m| match m.shape {
            Shape::Line(_) => "segment",
            Shape::Path(_) => "curve",
            Shape::Circle(_) => "point",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["segment", "curve", "point"]);
}

#[test]
fn disabled_layers_are_ignored_even_when_invalid() {
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("").with_enabled(false))
        .unwrap();
    fig.add_segment_set(SegmentSet::new("0 0 1 1").with_enabled(false))
        .unwrap();
    let doc = render(&fig).unwrap();
    assert_eq!(doc.marks_in(LayerRole::Data).count(), 0);
}

#[test]
fn empty_domain_skips_the_layer_before_compiling() {
    let calls = Cell::new(0);
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("").with_domain(20.0, 30.0))
        .unwrap();
    let doc = compose(&fig, |src: &str| {
        calls.set(calls.get() + 1);
        toy_compile(src)
    })
    .unwrap();
    assert_eq!(calls.get(), 0);
    assert_eq!(doc.marks_in(LayerRole::Data).count(), 0);
}

#[test]
fn inverted_range_fails_without_touching_the_last_good_document() {
    let mut renderer = Renderer::new(toy_compile);
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("x")).unwrap();
    let good = renderer.render(&fig).unwrap().clone();

    fig.viewport = fig.viewport.with_x_range(5.0, -5.0);
    let err = renderer.render(&fig).unwrap_err();
    assert_eq!(
        err,
        RenderError::InvalidRange {
            axis: Axis::X,
            min: 5.0,
            max: -5.0
        }
    );
    assert_eq!(renderer.last_good(), Some(&good));
}

#[test]
fn non_positive_steps_are_rejected() {
    let mut fig = Figure::default();
    fig.viewport = fig.viewport.with_steps(1.0, 0.0, 2.0);
    assert_eq!(
        render(&fig).unwrap_err(),
        RenderError::NonPositiveStep {
            step: StepKind::Major,
            value: 0.0
        }
    );
}

#[test]
fn empty_and_bad_expressions_are_render_fatal() {
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("x")).unwrap();
    fig.add_function(FunctionLayer::new("y = ")).unwrap();
    assert_eq!(
        render(&fig).unwrap_err(),
        RenderError::EmptyExpression { layer: 1 }
    );

    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("y = sin(")).unwrap();
    let err = render(&fig).unwrap_err();
    assert!(matches!(err, RenderError::Compile { layer: 0, .. }));
    assert!(std::string::ToString::to_string(&err).starts_with("function 1: "));
}

#[test]
fn cache_is_warm_on_the_second_render() {
    let mut renderer =
        Renderer::new(toy_compile).with_cache(ExpressionCache::new().with_capacity_limit(8));
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("y = 2x + 3")).unwrap();
    fig.add_function(FunctionLayer::new("Y = x^2 - 4")).unwrap();

    renderer.render(&fig).unwrap();
    assert_eq!(renderer.cache().misses(), 2);
    assert_eq!(renderer.cache().hits(), 0);

    let first = renderer.last_good().cloned();
    renderer.render(&fig).unwrap();
    assert_eq!(renderer.cache().misses(), 2);
    assert_eq!(renderer.cache().hits(), 2);
    assert_eq!(renderer.last_good().cloned(), first, "cache must not change output");

    renderer.cache_mut().clear();
    renderer.render(&fig).unwrap();
    assert_eq!(renderer.cache().misses(), 2);
}

#[test]
fn annotations_split_into_clipped_and_free_groups() {
    let mut fig = Figure::default();
    fig.add_annotation("inside").unwrap();
    let free = fig.add_annotation("outside").unwrap();
    free.clip_to_plot = false;
    free.color = css::RED;
    let doc = render(&fig).unwrap();

    let clipped: Vec<String> = doc
        .marks_in(LayerRole::ClippedAnnotations)
        .filter_map(|m| m.text().map(|t| t.text.clone()))
        .collect();
    let unclipped: Vec<String> = doc
        .marks_in(LayerRole::FreeAnnotations)
        .filter_map(|m| m.text().map(|t| t.text.clone()))
        .collect();
    assert_eq!(clipped, ["inside"]);
    assert_eq!(unclipped, ["outside"]);
}

#[test]
fn mark_ids_are_unique_and_in_paint_order() {
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("y = 1/x")).unwrap();
    fig.add_point_set(PointSet::new("1 2\n3 4")).unwrap();
    fig.add_annotation("Label").unwrap();
    let doc = render(&fig).unwrap();
    let ids: Vec<u64> = doc.marks().map(|m| m.id.0).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids.len(), doc.mark_count());
}

#[test]
fn rendering_is_deterministic() {
    let mut fig = Figure::default();
    fig.add_function(FunctionLayer::new("y = x^2 - 4")).unwrap();
    fig.add_annotation("Label").unwrap();
    assert_eq!(render(&fig).unwrap(), render(&fig).unwrap());
}
