// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotation text marks and the drag command model.
//!
//! Rendering is stateless: every annotation becomes a centered text mark tagged with its id.
//! Dragging is modelled as three commands driven by an external input layer:
//!
//! 1. [`AnnotationDrag::begin`] when the pointer goes down on an annotation,
//! 2. [`AnnotationDrag::move_to`] for each pointer move (returns where to draw the text),
//! 3. [`AnnotationDrag::commit`] (or [`Figure::apply_drag`]) on release.
//!
//! The dragged text follows the pointer delta in device space; only the commit maps back to
//! graph space.

use alloc::string::ToString;
use alloc::vec::Vec;

use gridplot_core::{FontWeight, Mapper, Mark, Shape, Style, TextAnchor, TextBaseline, TextSpec};
use kurbo::{Point, Vec2};

use crate::figure::Figure;
use crate::ids::MarkIds;
use crate::layers::{Annotation, AnnotationId};

/// The text mark for one annotation.
pub fn annotation_mark(
    annotation: &Annotation,
    style: &Style,
    mapper: &Mapper,
    ids: &mut MarkIds,
) -> Mark {
    let weight = if annotation.bold {
        FontWeight::BOLD
    } else {
        FontWeight::NORMAL
    };
    let text = TextSpec::new(
        mapper.to_device(annotation.position),
        annotation.text.clone(),
        style.font_family.clone(),
        annotation.font_size,
    )
    .with_anchor(TextAnchor::Middle)
    .with_baseline(TextBaseline::Middle)
    .with_weight(weight)
    .with_data_id(annotation.id.to_string());
    Mark::new(ids.next_id(), Shape::Text(text)).with_fill(annotation.color)
}

/// Annotation marks split into `(clipped, free)` by each annotation's `clip_to_plot` flag.
pub fn annotation_marks<'a>(
    annotations: impl IntoIterator<Item = &'a Annotation>,
    style: &Style,
    mapper: &Mapper,
    ids: &mut MarkIds,
) -> (Vec<Mark>, Vec<Mark>) {
    let mut clipped = Vec::new();
    let mut free = Vec::new();
    for a in annotations {
        let mark = annotation_mark(a, style, mapper, ids);
        if a.clip_to_plot {
            clipped.push(mark);
        } else {
            free.push(mark);
        }
    }
    (clipped, free)
}

/// An in-progress drag of one annotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnotationDrag {
    id: AnnotationId,
    origin: Point,
    pointer_start: Point,
    current: Point,
}

impl AnnotationDrag {
    /// Starts dragging annotation `id` from device-space `pointer`.
    ///
    /// Returns `None` if the figure has no such annotation.
    pub fn begin(figure: &Figure, mapper: &Mapper, id: AnnotationId, pointer: Point) -> Option<Self> {
        let annotation = figure.annotation(id)?;
        let origin = mapper.to_device(annotation.position);
        Some(Self {
            id,
            origin,
            pointer_start: pointer,
            current: origin,
        })
    }

    /// Updates the pointer position and returns the annotation's new device position.
    pub fn move_to(&mut self, pointer: Point) -> Point {
        self.current = self.origin + (pointer - self.pointer_start);
        self.current
    }

    /// The annotation being dragged.
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    /// Current device-space position of the annotation.
    pub fn position(&self) -> Point {
        self.current
    }

    /// Device-space displacement since [`begin`](Self::begin).
    pub fn delta(&self) -> Vec2 {
        self.current - self.origin
    }

    /// Ends the drag, returning the annotation id and its new graph-space position.
    pub fn commit(self, mapper: &Mapper) -> (AnnotationId, Point) {
        (self.id, mapper.to_graph(self.current))
    }
}

impl Figure {
    /// Commits a finished drag into the model.
    ///
    /// Returns `false` if the annotation was removed while it was being dragged.
    pub fn apply_drag(&mut self, drag: AnnotationDrag, mapper: &Mapper) -> bool {
        let (id, position) = drag.commit(mapper);
        let moved = self.set_annotation_position(id, position);
        tracing::debug!(%id, x = position.x, y = position.y, moved, "annotation drag committed");
        moved
    }
}
