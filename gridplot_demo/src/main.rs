// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a gridplot figure to an SVG file.
//!
//! With no arguments this writes the stock figure (two functions, one point set and a label)
//! to `graph.svg`. Set `RUST_LOG=debug` to see what the renderer is doing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gridplot_charts::{
    EndpointStyle, Figure, FunctionLayer, PointSet, Renderer, SegmentSet,
};
use gridplot_core::{Style, Viewport};
use gridplot_expr::Evaluator;
use gridplot_svg::to_svg_string;
use kurbo::Point;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Where to write the SVG.
    #[arg(long, default_value = "graph.svg")]
    out: PathBuf,

    /// Canvas width and height in pixels.
    #[arg(long, default_value_t = 760.0)]
    size: f64,

    /// Left edge of the visible range.
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    xmin: f64,

    /// Right edge of the visible range.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    xmax: f64,

    /// Bottom edge of the visible range.
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    ymin: f64,

    /// Top edge of the visible range.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    ymax: f64,

    /// A function to plot, e.g. "y = sin(x)". Repeatable; replaces the stock functions.
    #[arg(long = "function", value_name = "EXPR")]
    functions: Vec<String>,

    /// A point list, one point per `;` or newline, e.g. "(1,2); (3,4)". Repeatable; replaces
    /// the stock point set.
    #[arg(long = "points", value_name = "TEXT")]
    points: Vec<String>,
}

impl Cli {
    fn figure(&self) -> Figure {
        let viewport = Viewport::default()
            .with_x_range(self.xmin, self.xmax)
            .with_y_range(self.ymin, self.ymax)
            .with_canvas_size(self.size);
        let mut figure = stock_figure(viewport);

        if !self.functions.is_empty() {
            figure.functions.clear();
            for (i, expr) in self.functions.iter().enumerate() {
                let layer = FunctionLayer::new(expr.as_str()).with_label(format!("f{}", i + 1));
                if let Err(err) = figure.add_function(layer) {
                    tracing::warn!(%err, expr, "ignoring function");
                }
            }
        }
        if !self.points.is_empty() {
            figure.point_sets.clear();
            for text in &self.points {
                let set = PointSet::new(text.replace(';', "\n"));
                if let Err(err) = figure.add_point_set(set) {
                    tracing::warn!(%err, "ignoring point set");
                }
            }
        }
        figure.sanitized()
    }
}

/// The figure a fresh session starts with.
fn stock_figure(viewport: Viewport) -> Figure {
    let mut figure = Figure::new(viewport, Style::default());
    let layers = [
        FunctionLayer::new("y = 2x + 3").with_label("f1"),
        FunctionLayer::new("y = x^2 - 4")
            .with_label("f2")
            .with_endpoints(EndpointStyle::Open, EndpointStyle::Open),
    ];
    for layer in layers {
        if let Err(err) = figure.add_function(layer) {
            tracing::warn!(%err, "stock function dropped");
        }
    }
    let points = PointSet::new("(-6, 2)\n(-2, 5)\n(0, 0)\n(3, -4)\n(7, 6)").with_label("Points A");
    if let Err(err) = figure.add_point_set(points) {
        tracing::warn!(%err, "stock point set dropped");
    }
    let segments = SegmentSet::new("(-8,-8)->(8,8)\n(-8,8)->(8,-8)")
        .with_label("Segments A")
        .with_enabled(false);
    if let Err(err) = figure.add_segment_set(segments) {
        tracing::warn!(%err, "stock segment set dropped");
    }
    match figure.add_annotation("Label") {
        Ok(label) => label.position = Point::ZERO,
        Err(err) => tracing::warn!(%err, "stock annotation dropped"),
    }
    figure
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let figure = cli.figure();

    let mut renderer = Renderer::new(Evaluator);
    let doc = match renderer.render(&figure) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let svg = to_svg_string(doc);
    if let Err(err) = std::fs::write(&cli.out, svg) {
        eprintln!("error: could not write {}: {err}", cli.out.display());
        return ExitCode::FAILURE;
    }
    println!("wrote {}", cli.out.display());
    ExitCode::SUCCESS
}
