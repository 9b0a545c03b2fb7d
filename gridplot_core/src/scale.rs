// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scale between two closed intervals.

/// A linear mapping from a continuous domain to a continuous range.
///
/// The range may be "reversed" (`range.0 > range.1`); this is how the y axis is flipped when
/// going from graph space to device space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    ///
    /// A degenerate range maps everything to the start of the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Range units per domain unit (negative for a reversed range).
    pub fn scale_factor(&self) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 { 0.0 } else { (r1 - r0) / denom }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn maps_endpoints_to_range() {
        let s = ScaleLinear::new((-10.0, 10.0), (0.0, 200.0));
        assert!((s.map(-10.0) - 0.0).abs() < 1e-9);
        assert!((s.map(10.0) - 200.0).abs() < 1e-9);
        assert!((s.map(0.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn reversed_range_inverts() {
        let s = ScaleLinear::new((0.0, 4.0), (100.0, 20.0));
        assert!((s.map(1.0) - 80.0).abs() < 1e-9);
        assert!((s.invert(80.0) - 1.0).abs() < 1e-9);
        assert!(s.scale_factor() < 0.0, "reversed range should have a negative factor");
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((3.0, 3.0), (5.0, 15.0));
        assert_eq!(s.map(42.0), 5.0);
        assert_eq!(s.scale_factor(), 0.0);
    }
}
