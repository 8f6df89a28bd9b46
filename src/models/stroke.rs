// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke data structures.
//!
//! This module defines the core data structures for representing
//! free-hand brush gestures, along with the fixed brush configuration.

use crate::mask::MASK_MARKED;

/// Brush diameter in source-image pixels. There is exactly one brush
/// with no size or color controls, so the configuration is a pair of
/// constants rather than runtime state.
pub const BRUSH_WIDTH: f32 = 20.0;

/// Brush shade: strokes always paint the mask's marked value.
pub const BRUSH_LUMA: u8 = MASK_MARKED;

/// A 2D point in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One free-hand gesture: the sampled pointer path plus the brush
/// parameters that were in effect when it was drawn.
///
/// Width and shade are captured per stroke so that already-committed
/// strokes keep rendering the same way even if the brush constants
/// ever change between sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub width: f32,
    pub luma: u8,
}

impl Stroke {
    /// Start a new stroke at the given point with the fixed brush.
    pub fn begin(start: Point) -> Self {
        Self {
            points: vec![start],
            width: BRUSH_WIDTH,
            luma: BRUSH_LUMA,
        }
    }

    /// Extend the stroke with the next sampled pointer position.
    /// Consecutive duplicates are dropped so a stationary pointer does
    /// not inflate the path.
    pub fn push(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    /// Number of captured points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_captures_fixed_brush() {
        let stroke = Stroke::begin(Point::new(10.0, 20.0));
        assert_eq!(stroke.point_count(), 1);
        assert_eq!(stroke.points[0], Point::new(10.0, 20.0));
        assert_eq!(stroke.width, BRUSH_WIDTH);
        assert_eq!(stroke.luma, BRUSH_LUMA);
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut stroke = Stroke::begin(Point::new(0.0, 0.0));
        stroke.push(Point::new(1.0, 1.0));
        stroke.push(Point::new(2.0, 4.0));
        assert_eq!(stroke.points.len(), 3);
        assert_eq!(stroke.points[2], Point::new(2.0, 4.0));
    }

    #[test]
    fn test_push_drops_consecutive_duplicates() {
        let mut stroke = Stroke::begin(Point::new(5.0, 5.0));
        stroke.push(Point::new(5.0, 5.0));
        stroke.push(Point::new(5.0, 5.0));
        assert_eq!(stroke.point_count(), 1);

        stroke.push(Point::new(6.0, 5.0));
        stroke.push(Point::new(5.0, 5.0));
        assert_eq!(stroke.point_count(), 3);
    }
}
