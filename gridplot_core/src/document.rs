// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The output document: ordered layers of marks plus one shared clip region.
//!
//! A document holds no references back into the figure it was rendered from. Serializers
//! (SVG, raster) walk [`Document::layers`] in order and wrap clipped layers in the clip
//! region given by [`Document::clip`].

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{BezPath, Circle, Line, Point, Rect};
use peniko::Brush;

use crate::style::StrokeStyle;
use crate::z_order;

/// A stable mark identifier, unique within one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// `pos` is the start of the text.
    Start,
    /// `pos` is the horizontal center.
    Middle,
    /// `pos` is the end of the text.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// `pos.y` is the alphabetic baseline.
    Alphabetic,
    /// `pos.y` is the vertical middle.
    Middle,
    /// `pos.y` is the top (hanging) baseline.
    Hanging,
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    /// Anchor position in device space.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// CSS font family list.
    pub font_family: Arc<str>,
    /// Font size in device units.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Identifier exposed to interaction layers (annotation id), if any.
    pub data_id: Option<String>,
}

impl TextSpec {
    /// Creates a start-anchored, alphabetic-baseline text at `pos`.
    pub fn new(pos: Point, text: impl Into<String>, font_family: Arc<str>, font_size: f64) -> Self {
        Self {
            pos,
            text: text.into(),
            font_family,
            font_size,
            font_weight: FontWeight::NORMAL,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            data_id: None,
        }
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the font weight.
    pub fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }

    /// Attaches an interaction identifier.
    pub fn with_data_id(mut self, id: impl Into<String>) -> Self {
        self.data_id = Some(id.into());
        self
    }
}

/// The geometry of a mark, in device space.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A straight line segment.
    Line(Line),
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A circle.
    Circle(Circle),
    /// An arbitrary path, possibly made of several disjoint sub-paths.
    Path(BezPath),
    /// A text node.
    Text(TextSpec),
}

/// One drawable item.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Identifier, unique within the document.
    pub id: MarkId,
    /// Geometry.
    pub shape: Shape,
    /// Interior paint. `None` means unfilled.
    pub fill: Option<Brush>,
    /// Outline. `None` means unstroked.
    pub stroke: Option<StrokeStyle>,
    /// Whole-mark opacity in `0..=1`.
    pub opacity: f64,
}

impl Mark {
    /// Creates an unpainted, fully opaque mark.
    pub fn new(id: MarkId, shape: Shape) -> Self {
        Self {
            id,
            shape,
            fill: None,
            stroke: None,
            opacity: 1.0,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, brush: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = Some(StrokeStyle::solid(brush, stroke_width));
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Returns the text payload, if this is a text mark.
    pub fn text(&self) -> Option<&TextSpec> {
        match &self.shape {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// What a layer holds. The declaration order is the paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerRole {
    /// Full-canvas background fill.
    Background,
    /// Minor/major gridlines.
    Grid,
    /// Segments, then functions, then points.
    Data,
    /// Axis lines.
    Axes,
    /// Plot border.
    Border,
    /// Tick labels.
    Labels,
    /// Annotations restricted to the plot area.
    ClippedAnnotations,
    /// Annotations drawn anywhere.
    FreeAnnotations,
}

impl LayerRole {
    /// Every role, bottom to top.
    pub const ALL: [Self; 8] = [
        Self::Background,
        Self::Grid,
        Self::Data,
        Self::Axes,
        Self::Border,
        Self::Labels,
        Self::ClippedAnnotations,
        Self::FreeAnnotations,
    ];

    /// Paint order value (see [`crate::z_order`]).
    pub fn z_index(self) -> i32 {
        match self {
            Self::Background => z_order::BACKGROUND,
            Self::Grid => z_order::GRID_LINES,
            Self::Data => z_order::DATA,
            Self::Axes => z_order::AXIS_RULES,
            Self::Border => z_order::BORDER,
            Self::Labels => z_order::AXIS_LABELS,
            Self::ClippedAnnotations => z_order::CLIPPED_ANNOTATIONS,
            Self::FreeAnnotations => z_order::FREE_ANNOTATIONS,
        }
    }

    /// Whether this layer is restricted to the document clip region.
    pub fn is_clipped(self) -> bool {
        matches!(self, Self::Data | Self::ClippedAnnotations)
    }
}

/// An ordered group of marks sharing a role.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// What this layer holds.
    pub role: LayerRole,
    /// Marks in paint order.
    pub marks: Vec<Mark>,
}

impl Layer {
    /// Creates a layer.
    pub fn new(role: LayerRole, marks: Vec<Mark>) -> Self {
        Self { role, marks }
    }

    /// Whether the layer is clipped to the plot area.
    pub fn is_clipped(&self) -> bool {
        self.role.is_clipped()
    }
}

/// A self-contained square vector document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    size: f64,
    clip: Rect,
    layers: Vec<Layer>,
}

impl Document {
    /// Creates a document and sorts `layers` into paint order.
    ///
    /// The sort is stable, so layers sharing a role keep their relative order.
    pub fn new(size: f64, clip: Rect, mut layers: Vec<Layer>) -> Self {
        layers.sort_by_key(|l| l.role.z_index());
        Self { size, clip, layers }
    }

    /// Width and height of the canvas.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// The clip region shared by every clipped layer.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Layers in paint order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The first layer with the given role.
    pub fn layer(&self, role: LayerRole) -> Option<&Layer> {
        self.layers.iter().find(|l| l.role == role)
    }

    /// Marks of every layer with the given role, in paint order.
    pub fn marks_in(&self, role: LayerRole) -> impl Iterator<Item = &Mark> {
        self.layers
            .iter()
            .filter(move |l| l.role == role)
            .flat_map(|l| l.marks.iter())
    }

    /// Every mark in paint order.
    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.layers.iter().flat_map(|l| l.marks.iter())
    }

    /// Total number of marks.
    pub fn mark_count(&self) -> usize {
        self.layers.iter().map(|l| l.marks.len()).sum()
    }
}
