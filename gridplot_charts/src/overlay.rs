// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point set and segment set marks.

use alloc::vec::Vec;

use gridplot_core::{Mapper, Mark, Shape};
use kurbo::{BezPath, Circle, Line};

use crate::ids::MarkIds;
use crate::layers::{PointSet, SegmentSet};
use crate::parse::{parse_points, parse_segments};

/// Marks for one point set: the connecting polyline (when requested and there are at least
/// two points), then one filled dot per point.
pub fn point_set_marks(set: &PointSet, mapper: &Mapper, ids: &mut MarkIds) -> Vec<Mark> {
    let points = parse_points(&set.points);
    let mut marks = Vec::with_capacity(points.len() + 1);

    if set.connect_in_order && points.len() >= 2 {
        let mut path = BezPath::new();
        for (i, p) in points.iter().enumerate() {
            let d = mapper.to_device(*p);
            if i == 0 {
                path.move_to(d);
            } else {
                path.line_to(d);
            }
        }
        marks.push(
            Mark::new(ids.next_id(), Shape::Path(path))
                .with_stroke(set.line_color, set.line_width),
        );
    }

    for p in &points {
        let dot = Circle::new(mapper.to_device(*p), set.point_radius);
        marks.push(Mark::new(ids.next_id(), Shape::Circle(dot)).with_fill(set.point_color));
    }
    marks
}

/// One stroked line per parsed segment.
pub fn segment_set_marks(set: &SegmentSet, mapper: &Mapper, ids: &mut MarkIds) -> Vec<Mark> {
    parse_segments(&set.segments)
        .into_iter()
        .map(|seg| {
            let line = Line::new(mapper.to_device(seg.p0), mapper.to_device(seg.p1));
            Mark::new(ids.next_id(), Shape::Line(line)).with_stroke(set.color, set.width)
        })
        .collect()
}
