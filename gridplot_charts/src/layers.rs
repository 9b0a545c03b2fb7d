// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay layer definitions: function curves, point sets, segment sets and annotations.

use alloc::string::String;
use core::fmt;

use kurbo::Point;
use peniko::Color;
use peniko::color::palette::css;

/// How a restricted-domain boundary is marked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EndpointStyle {
    /// No marker.
    None,
    /// A circle filled with the background and stroked with the curve color.
    Open,
    /// A circle filled with the curve color.
    #[default]
    Closed,
}

/// A closed x-interval the curve is restricted to.
///
/// The bounds may be given in either order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainRestriction {
    /// One bound.
    pub min: f64,
    /// The other bound.
    pub max: f64,
}

impl DomainRestriction {
    /// Creates a restriction.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The bounds as `(low, high)`.
    pub fn ordered(&self) -> (f64, f64) {
        (self.min.min(self.max), self.min.max(self.max))
    }
}

/// Endpoint marker settings. Only used when a [`DomainRestriction`] is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndpointDisplay {
    /// Draw markers at all.
    pub show: bool,
    /// Marker at the low end of the domain.
    pub left: EndpointStyle,
    /// Marker at the high end of the domain.
    pub right: EndpointStyle,
    /// Marker radius in device units.
    pub radius: f64,
}

impl Default for EndpointDisplay {
    fn default() -> Self {
        Self {
            show: true,
            left: EndpointStyle::Closed,
            right: EndpointStyle::Closed,
            radius: 6.0,
        }
    }
}

/// A `y = f(x)` curve.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLayer {
    /// Whether the layer is drawn.
    pub enabled: bool,
    /// Display name.
    pub label: String,
    /// Expression text, optionally prefixed with `y =`.
    pub expression: String,
    /// Curve and marker color.
    pub color: Color,
    /// Curve width in device units.
    pub width: f64,
    /// Sampling density relative to the plot's device size.
    pub samples_per_pixel: f64,
    /// Optional x restriction.
    pub domain: Option<DomainRestriction>,
    /// Endpoint markers for a restricted domain.
    pub endpoints: EndpointDisplay,
}

impl FunctionLayer {
    /// Creates an enabled black curve for `expression`.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Self::default()
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the curve color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the curve width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets the sampling density.
    pub fn with_samples_per_pixel(mut self, samples_per_pixel: f64) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Restricts the curve to `[min, max]` (in either order).
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some(DomainRestriction::new(min, max));
        self
    }

    /// Sets the endpoint markers.
    pub fn with_endpoints(mut self, left: EndpointStyle, right: EndpointStyle) -> Self {
        self.endpoints.left = left;
        self.endpoints.right = right;
        self
    }

    /// Sets the endpoint marker radius.
    pub fn with_endpoint_radius(mut self, radius: f64) -> Self {
        self.endpoints.radius = radius;
        self
    }

    /// Enables or disables the layer.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for FunctionLayer {
    fn default() -> Self {
        Self {
            enabled: true,
            label: String::new(),
            expression: String::from("y = 2x + 3"),
            color: css::BLACK,
            width: 2.5,
            samples_per_pixel: 1.5,
            domain: None,
            endpoints: EndpointDisplay::default(),
        }
    }
}

/// Discrete points parsed from text, one `(x, y)` per line.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    /// Whether the layer is drawn.
    pub enabled: bool,
    /// Display name.
    pub label: String,
    /// Text-encoded points.
    pub points: String,
    /// Dot color.
    pub point_color: Color,
    /// Dot radius in device units.
    pub point_radius: f64,
    /// Join the points with a polyline in line order.
    pub connect_in_order: bool,
    /// Polyline color.
    pub line_color: Color,
    /// Polyline width.
    pub line_width: f64,
}

impl PointSet {
    /// Creates an enabled point set from text.
    pub fn new(points: impl Into<String>) -> Self {
        Self {
            points: points.into(),
            ..Self::default()
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets dot color and radius.
    pub fn with_points_style(mut self, color: Color, radius: f64) -> Self {
        self.point_color = color;
        self.point_radius = radius;
        self
    }

    /// Connects the points in order with the given stroke.
    pub fn with_connection(mut self, color: Color, width: f64) -> Self {
        self.connect_in_order = true;
        self.line_color = color;
        self.line_width = width;
        self
    }

    /// Enables or disables the layer.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for PointSet {
    fn default() -> Self {
        Self {
            enabled: true,
            label: String::new(),
            points: String::new(),
            point_color: css::BLACK,
            point_radius: 4.0,
            connect_in_order: false,
            line_color: css::BLACK,
            line_width: 2.0,
        }
    }
}

/// Line segments parsed from text, one `(x1, y1) -> (x2, y2)` per line.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentSet {
    /// Whether the layer is drawn.
    pub enabled: bool,
    /// Display name.
    pub label: String,
    /// Text-encoded segments.
    pub segments: String,
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

impl SegmentSet {
    /// Creates an enabled segment set from text.
    pub fn new(segments: impl Into<String>) -> Self {
        Self {
            segments: segments.into(),
            ..Self::default()
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.color = color;
        self.width = width;
        self
    }

    /// Enables or disables the layer.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for SegmentSet {
    fn default() -> Self {
        Self {
            enabled: true,
            label: String::new(),
            segments: String::new(),
            color: css::BLACK,
            width: 2.0,
        }
    }
}

/// Stable annotation identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// A free-form text label placed in graph space.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub(crate) id: AnnotationId,
    /// Text content.
    pub text: String,
    /// Center of the text in graph space.
    pub position: Point,
    /// Text color.
    pub color: Color,
    /// Font size in device units.
    pub font_size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Restrict to the inner plot area.
    pub clip_to_plot: bool,
}

impl Annotation {
    /// Creates an annotation with the default look (18px, bold, black, clipped).
    pub fn new(id: AnnotationId, text: impl Into<String>, position: Point) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            color: css::BLACK,
            font_size: 18.0,
            bold: true,
            clip_to_plot: true,
        }
    }

    /// Unique, stable id. Inside a [`Figure`](crate::Figure) it is assigned by
    /// [`Figure::add_annotation`](crate::Figure::add_annotation) and never changes.
    pub fn id(&self) -> AnnotationId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn restriction_bounds_are_order_normalized() {
        assert_eq!(DomainRestriction::new(5.0, -2.0).ordered(), (-2.0, 5.0));
        assert_eq!(DomainRestriction::new(-2.0, 5.0).ordered(), (-2.0, 5.0));
    }

    #[test]
    fn annotation_ids_display_with_prefix() {
        assert_eq!(std::format!("{}", AnnotationId(7)), "a7");
    }
}
