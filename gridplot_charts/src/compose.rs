// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer compositor: one figure snapshot in, one document out.

use alloc::vec;
use alloc::vec::Vec;

use gridplot_core::{
    CompileError, Document, Layer, LayerRole, Mapper, Mark, RenderError, Shape, SharedExpr,
};
use kurbo::Rect;

use crate::annotation::annotation_marks;
use crate::expr::prepare_expression;
use crate::figure::Figure;
use crate::grid::GridLayout;
use crate::ids::MarkIds;
use crate::layers::FunctionLayer;
use crate::overlay::{point_set_marks, segment_set_marks};
use crate::tracer::{trace_function, trace_interval};

/// Renders `figure` into a document.
///
/// `compile` turns prepared expression text into a callable; pass an
/// [`ExpressionEvaluator`](gridplot_core::ExpressionEvaluator)'s `compile` directly, or route it
/// through an [`ExpressionCache`](crate::ExpressionCache) as [`Renderer`](crate::Renderer) does.
///
/// Validation and every compile happen before any mark is built, so an error never comes with
/// a partial document. Layers, bottom to top:
///
/// background, gridlines, data (segments, functions, points; clipped), axes, border,
/// tick labels, clipped annotations, free annotations.
pub fn compose<C>(figure: &Figure, mut compile: C) -> Result<Document, RenderError>
where
    C: FnMut(&str) -> Result<SharedExpr, CompileError>,
{
    let viewport = &figure.viewport;
    let style = &figure.style;
    viewport.validate()?;

    let mut curves: Vec<(&FunctionLayer, (f64, f64), SharedExpr)> = Vec::new();
    for (layer, f) in figure.functions.iter().enumerate() {
        if !f.enabled {
            continue;
        }
        let Some(interval) = trace_interval(f, viewport) else {
            tracing::trace!(layer, "empty domain, layer skipped");
            continue;
        };
        let prepared =
            prepare_expression(&f.expression).ok_or(RenderError::EmptyExpression { layer })?;
        let expr = compile(&prepared).map_err(|source| RenderError::Compile { layer, source })?;
        curves.push((f, interval, expr));
    }

    let mapper = Mapper::new(viewport);
    let size = mapper.canvas_size();
    let mut ids = MarkIds::new();

    let background = Mark::new(ids.next_id(), Shape::Rect(Rect::new(0.0, 0.0, size, size)))
        .with_fill(style.background);

    let grid = GridLayout::new(viewport, &mapper, style.font_size);
    let grid_marks = grid.grid_marks(style, &mut ids);

    let mut data = Vec::new();
    for set in figure.segment_sets.iter().filter(|s| s.enabled) {
        data.extend(segment_set_marks(set, &mapper, &mut ids));
    }
    for (f, interval, expr) in &curves {
        let trace = trace_function(&**expr, f, *interval, viewport, &mapper);
        data.extend(trace.marks(f, style, &mut ids));
    }
    for set in figure.point_sets.iter().filter(|s| s.enabled) {
        data.extend(point_set_marks(set, &mapper, &mut ids));
    }

    let axes = grid.axis_marks(style, &mut ids);
    let border = grid.border_marks(style, &mut ids);
    let labels = grid.label_marks(style, &mut ids);
    let (clipped, free) = annotation_marks(figure.annotations(), style, &mapper, &mut ids);

    let doc = Document::new(
        size,
        mapper.plot_rect(),
        vec![
            Layer::new(LayerRole::Background, vec![background]),
            Layer::new(LayerRole::Grid, grid_marks),
            Layer::new(LayerRole::Data, data),
            Layer::new(LayerRole::Axes, axes),
            Layer::new(LayerRole::Border, border),
            Layer::new(LayerRole::Labels, labels),
            Layer::new(LayerRole::ClippedAnnotations, clipped),
            Layer::new(LayerRole::FreeAnnotations, free),
        ],
    );
    tracing::debug!(
        size,
        functions = curves.len(),
        marks = doc.mark_count(),
        "composed document"
    );
    Ok(doc)
}
