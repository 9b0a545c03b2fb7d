// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editable figure model: viewport, style and four capped layer lists.
//!
//! All mutation happens here, outside the render pass. A render borrows a `Figure` immutably
//! and returns a fresh [`gridplot_core::Document`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use gridplot_core::{Style, Viewport};
use kurbo::Point;

use crate::layers::{Annotation, AnnotationId, FunctionLayer, PointSet, SegmentSet};

/// Maximum number of function layers.
pub const MAX_FUNCTIONS: usize = 4;
/// Maximum number of point sets.
pub const MAX_POINT_SETS: usize = 4;
/// Maximum number of segment sets.
pub const MAX_SEGMENT_SETS: usize = 4;
/// Maximum number of annotations.
pub const MAX_ANNOTATIONS: usize = 8;

/// The kinds of overlay layer a figure holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// [`FunctionLayer`].
    Function,
    /// [`PointSet`].
    PointSet,
    /// [`SegmentSet`].
    SegmentSet,
    /// [`Annotation`].
    Annotation,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Function => "function",
            Self::PointSet => "point set",
            Self::SegmentSet => "segment set",
            Self::Annotation => "annotation",
        })
    }
}

/// A layer could not be added because its list is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot add another {kind}: the limit is {cap}")]
pub struct CapacityError {
    /// The list that is full.
    pub kind: LayerKind,
    /// Its capacity.
    pub cap: usize,
}

/// An ordered list with a hard capacity.
///
/// Additions beyond the cap are rejected and leave the list unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerList<T> {
    kind: LayerKind,
    cap: usize,
    items: Vec<T>,
}

impl<T> LayerList<T> {
    /// Creates an empty list.
    pub fn new(kind: LayerKind, cap: usize) -> Self {
        Self {
            kind,
            cap,
            items: Vec::new(),
        }
    }

    /// Appends an item, returning a handle to it.
    pub fn push(&mut self, item: T) -> Result<&mut T, CapacityError> {
        if self.is_full() {
            return Err(CapacityError {
                kind: self.kind,
                cap: self.cap,
            });
        }
        self.items.push(item);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes and returns the item at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// The item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// The item at `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Items in order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Items in order, mutably.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another push would be rejected.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    /// The capacity.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl<'a, T> IntoIterator for &'a LayerList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Everything a render reads.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    /// Visible range and grid settings.
    pub viewport: Viewport,
    /// Shared styling.
    pub style: Style,
    /// Function curves, drawn above segments.
    pub functions: LayerList<FunctionLayer>,
    /// Point sets, drawn above functions.
    pub point_sets: LayerList<PointSet>,
    /// Segment sets, drawn lowest among data layers.
    pub segment_sets: LayerList<SegmentSet>,
    annotations: LayerList<Annotation>,
    next_annotation_id: u64,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(Viewport::default(), Style::default())
    }
}

impl Figure {
    /// Creates a figure with no overlay layers.
    pub fn new(viewport: Viewport, style: Style) -> Self {
        Self {
            viewport,
            style,
            functions: LayerList::new(LayerKind::Function, MAX_FUNCTIONS),
            point_sets: LayerList::new(LayerKind::PointSet, MAX_POINT_SETS),
            segment_sets: LayerList::new(LayerKind::SegmentSet, MAX_SEGMENT_SETS),
            annotations: LayerList::new(LayerKind::Annotation, MAX_ANNOTATIONS),
            next_annotation_id: 1,
        }
    }

    /// Appends a function layer.
    pub fn add_function(
        &mut self,
        layer: FunctionLayer,
    ) -> Result<&mut FunctionLayer, CapacityError> {
        self.functions.push(layer)
    }

    /// Appends a point set.
    pub fn add_point_set(&mut self, set: PointSet) -> Result<&mut PointSet, CapacityError> {
        self.point_sets.push(set)
    }

    /// Appends a segment set.
    pub fn add_segment_set(&mut self, set: SegmentSet) -> Result<&mut SegmentSet, CapacityError> {
        self.segment_sets.push(set)
    }

    /// Creates an annotation with a fresh id at the viewport center.
    pub fn add_annotation(
        &mut self,
        text: impl Into<String>,
    ) -> Result<&mut Annotation, CapacityError> {
        if self.annotations.is_full() {
            return Err(CapacityError {
                kind: LayerKind::Annotation,
                cap: self.annotations.cap(),
            });
        }
        let id = AnnotationId(self.next_annotation_id);
        self.next_annotation_id += 1;
        self.annotations
            .push(Annotation::new(id, text, self.viewport.center()))
    }

    /// Text annotations, in paint order.
    ///
    /// The list is read-only from outside so ids stay unique; add annotations with
    /// [`Figure::add_annotation`].
    ///
    /// ```compile_fail
    /// use gridplot_charts::{Annotation, AnnotationId, Figure};
    ///
    /// let mut fig = Figure::default();
    /// fig.annotations.push(Annotation::new(AnnotationId(1), "B", Default::default()));
    /// ```
    pub fn annotations(&self) -> &LayerList<Annotation> {
        &self.annotations
    }

    /// Looks up an annotation by id.
    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Looks up an annotation by id, mutably.
    pub fn annotation_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    /// Removes an annotation by id.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        self.annotations.remove(index)
    }

    /// Moves an annotation. Returns `false` if the id is unknown.
    pub fn set_annotation_position(&mut self, id: AnnotationId, position: Point) -> bool {
        match self.annotation_mut(id) {
            Some(a) => {
                a.position = position;
                true
            }
            None => false,
        }
    }

    /// Returns a copy with UI-facing numeric inputs clamped to sane limits.
    ///
    /// Ranges and steps are left alone: invalid values there must still fail the render.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.viewport.canvas_size = clamp(out.viewport.canvas_size, 200.0, 2400.0);
        for f in out.functions.iter_mut() {
            f.width = clamp(f.width, 0.5, 20.0);
            f.samples_per_pixel = clamp(f.samples_per_pixel, 0.2, 6.0);
            if let Some(d) = &mut f.domain {
                d.min = clamp(d.min, -1e6, 1e6);
                d.max = clamp(d.max, -1e6, 1e6);
            }
            f.endpoints.radius = clamp(f.endpoints.radius, 2.0, 20.0);
        }
        for p in out.point_sets.iter_mut() {
            p.point_radius = clamp(p.point_radius, 1.0, 30.0);
            p.line_width = clamp(p.line_width, 0.5, 20.0);
        }
        for s in out.segment_sets.iter_mut() {
            s.width = clamp(s.width, 0.5, 20.0);
        }
        out
    }
}

/// Like `f64::clamp`, but `NaN` lands on the lower bound.
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}
