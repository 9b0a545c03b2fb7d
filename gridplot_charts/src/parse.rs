// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-text point and segment lists.
//!
//! One entry per line. Anything that is not a number is treated as punctuation, so
//! `(-6, 2)`, `-6 2` and `x=-6; y=2` all parse to the same point. Lines with too few numbers
//! or with a non-finite value are skipped without error.

use alloc::vec::Vec;

use kurbo::{Line, Point};
use smallvec::SmallVec;

/// Parses one point per line from the first two numbers on each line.
pub fn parse_points(text: &str) -> Vec<Point> {
    entries::<2>(text)
        .map(|[x, y]| Point::new(x, y))
        .collect()
}

/// Parses one segment per line from the first four numbers on each line.
pub fn parse_segments(text: &str) -> Vec<Line> {
    entries::<4>(text)
        .map(|[x1, y1, x2, y2]| Line::new((x1, y1), (x2, y2)))
        .collect()
}

/// The first `N` numbers of every line that has at least `N` finite ones among them.
fn entries<const N: usize>(text: &str) -> impl Iterator<Item = [f64; N]> + '_ {
    text.lines().filter_map(|raw| {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }
        let nums: SmallVec<[f64; 4]> = numbers(line).take(N).collect();
        if nums.len() < N || nums.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let mut out = [0.0; N];
        out.copy_from_slice(&nums);
        Some(out)
    })
}

/// Scans `line` left to right for numeric tokens.
///
/// A token is an optional `-`, then digits with an optional fractional part (`12`, `1.5`,
/// `.5`), then an optional exponent (`e3`, `E-2`, `e+4`). A lone `.` or `-` is punctuation.
pub fn numbers(line: &str) -> impl Iterator<Item = f64> + '_ {
    let bytes = line.as_bytes();
    let mut i = 0;
    core::iter::from_fn(move || {
        while i < bytes.len() {
            if let Some(end) = token_end(bytes, i) {
                let start = i;
                i = end;
                // Every token the scanner accepts is valid float syntax.
                return Some(line[start..end].parse::<f64>().unwrap_or(f64::NAN));
            }
            i += 1;
        }
        None
    })
}

fn token_end(bytes: &[u8], start: usize) -> Option<usize> {
    let digit = |j: usize| bytes.get(j).is_some_and(u8::is_ascii_digit);
    let skip_digits = |mut j: usize| {
        while digit(j) {
            j += 1;
        }
        j
    };

    let mut j = start;
    if bytes.get(j) == Some(&b'-') {
        j += 1;
    }
    let int_end = skip_digits(j);
    let mut end = if bytes.get(int_end) == Some(&b'.') && digit(int_end + 1) {
        skip_digits(int_end + 1)
    } else if int_end > j {
        int_end
    } else {
        return None;
    };

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut k = end + 1;
        if matches!(bytes.get(k), Some(b'+' | b'-')) {
            k += 1;
        }
        if digit(k) {
            end = skip_digits(k);
        }
    }
    Some(end)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn malformed_lines_are_skipped_in_order() {
        let pts = parse_points("(-6, 2)\nbad line\n(3,-4)");
        assert_eq!(pts, vec![Point::new(-6.0, 2.0), Point::new(3.0, -4.0)]);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let pts = parse_points("\r\n  (1, 2)\r\n\r\n(3.5, .25)  \r\n");
        assert_eq!(pts, vec![Point::new(1.0, 2.0), Point::new(3.5, 0.25)]);
    }

    #[test]
    fn extra_numbers_are_ignored() {
        let pts = parse_points("1 2 3 4");
        assert_eq!(pts, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn segments_need_four_numbers() {
        let segs = parse_segments("(-8,-8)->(8,8)\n(1,2)->(3)\n(-8,8)->(8,-8)");
        assert_eq!(
            segs,
            vec![
                Line::new((-8.0, -8.0), (8.0, 8.0)),
                Line::new((-8.0, 8.0), (8.0, -8.0)),
            ]
        );
    }

    #[test]
    fn arrow_dash_is_not_a_sign() {
        // `->(` has no digit after the dash, so it is punctuation.
        let segs = parse_segments("(1,2)->(3,4)");
        assert_eq!(segs, vec![Line::new((1.0, 2.0), (3.0, 4.0))]);
    }

    #[test]
    fn exponents_are_scanned() {
        let v: std::vec::Vec<f64> = numbers("1e3, -2.5E-1 7e+2 4e").collect();
        assert_eq!(v, vec![1000.0, -0.25, 700.0, 4.0]);
    }

    #[test]
    fn overflowing_values_skip_the_line() {
        let pts = parse_points("(1e999, 2)\n(1, 2)");
        assert_eq!(pts, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn trailing_dot_is_punctuation() {
        let v: std::vec::Vec<f64> = numbers("3. and 1..5").collect();
        assert_eq!(v, vec![3.0, 1.0, 0.5]);
    }
}
