// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output for `gridplot_core` documents.
//!
//! [`to_svg_string`] writes a standalone SVG sized to the document, with one `<clipPath>` in
//! `<defs>` that every clipped layer references. Marks are written in document order.
//!
//! Raster export happens outside this crate (typically by handing the SVG to an image
//! decoder). When that decoder rejects the document, the adapter reports
//! [`ExportError::DecodeFailed`] and the user falls back to the SVG itself.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use gridplot_core::{Document, FontWeight, Mark, Shape, TextAnchor, TextBaseline};
use kurbo::{BezPath, PathEl, Rect};
use peniko::Brush;

/// Id of the clip path shared by the clipped layers.
pub const CLIP_ID: &str = "plotClip";

/// Raster export failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// The image decoder refused the SVG.
    #[error("SVG→PNG conversion blocked. Download SVG instead.")]
    DecodeFailed,
}

/// Serializes `doc` as a standalone SVG document.
pub fn to_svg_string(doc: &Document) -> String {
    let size = doc.size();
    let mut out = String::new();

    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    ));
    out.push('\n');
    out.push_str(&format!(r#"<defs><clipPath id="{CLIP_ID}">"#));
    push_rect(&mut out, doc.clip());
    out.push_str("/></clipPath></defs>\n");

    for layer in doc.layers() {
        if layer.is_clipped() {
            out.push_str(&format!(r#"<g clip-path="url(#{CLIP_ID})">"#));
            out.push('\n');
        }
        for mark in &layer.marks {
            write_mark(&mut out, mark);
        }
        if layer.is_clipped() {
            out.push_str("</g>\n");
        }
    }

    out.push_str("</svg>\n");
    tracing::debug!(bytes = out.len(), marks = doc.mark_count(), "serialized svg");
    out
}

fn push_rect(out: &mut String, r: Rect) {
    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.x0,
        r.y0,
        r.width(),
        r.height(),
    ));
}

fn write_mark(out: &mut String, mark: &Mark) {
    match &mark.shape {
        Shape::Line(l) => {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                l.p0.x, l.p0.y, l.p1.x, l.p1.y
            ));
            write_stroke(out, mark);
            write_opacity(out, mark);
            out.push_str("/>\n");
        }
        Shape::Rect(r) => {
            push_rect(out, *r);
            write_fill(out, mark);
            write_stroke(out, mark);
            write_opacity(out, mark);
            out.push_str("/>\n");
        }
        Shape::Circle(c) => {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}""#,
                c.center.x, c.center.y, c.radius
            ));
            write_fill(out, mark);
            write_stroke(out, mark);
            write_opacity(out, mark);
            out.push_str("/>\n");
        }
        Shape::Path(p) => {
            out.push_str(&format!(r#"<path d="{}""#, path_data(p)));
            write_fill(out, mark);
            write_stroke(out, mark);
            write_opacity(out, mark);
            out.push_str("/>\n");
        }
        Shape::Text(t) => {
            out.push_str("<text");
            if let Some(id) = &t.data_id {
                out.push_str(&format!(r#" data-anno-id="{}""#, escape_xml(id)));
            }
            out.push_str(&format!(r#" x="{}" y="{}""#, t.pos.x, t.pos.y));
            write_fill(out, mark);
            out.push_str(&format!(
                r#" font-size="{}" font-family="{}""#,
                t.font_size,
                escape_xml(&t.font_family)
            ));
            if t.font_weight != FontWeight::NORMAL {
                out.push_str(&format!(r#" font-weight="{}""#, t.font_weight.0));
            }
            match t.baseline {
                TextBaseline::Alphabetic => {}
                TextBaseline::Middle => out.push_str(r#" dominant-baseline="middle""#),
                TextBaseline::Hanging => out.push_str(r#" dominant-baseline="hanging""#),
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_opacity(out, mark);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
    }
}

/// SVG path data in absolute commands, `M x y L x y ...`.
fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => d.push_str(&format!("M {} {}", p.x, p.y)),
            PathEl::LineTo(p) => d.push_str(&format!("L {} {}", p.x, p.y)),
            PathEl::QuadTo(a, p) => d.push_str(&format!("Q {} {} {} {}", a.x, a.y, p.x, p.y)),
            PathEl::CurveTo(a, b, p) => d.push_str(&format!(
                "C {} {} {} {} {} {}",
                a.x, a.y, b.x, b.y, p.x, p.y
            )),
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn write_fill(out: &mut String, mark: &Mark) {
    match &mark.fill {
        Some(brush) => write_paint_attr(out, "fill", brush),
        None => out.push_str(r#" fill="none""#),
    }
}

fn write_stroke(out: &mut String, mark: &Mark) {
    if let Some(stroke) = &mark.stroke
        && stroke.stroke_width > 0.0
    {
        write_paint_attr(out, "stroke", &stroke.brush);
        out.push_str(&format!(r#" stroke-width="{}""#, stroke.stroke_width));
    }
}

fn write_opacity(out: &mut String, mark: &Mark) {
    if mark.opacity != 1.0 {
        out.push_str(&format!(r#" opacity="{}""#, mark.opacity));
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

/// Escapes the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
