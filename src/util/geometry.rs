// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between screen
//! space (the fitted on-screen image rectangle) and source-image pixel
//! space, which is where strokes are stored and masks are rasterized.

use crate::models::stroke::Point;
use egui::{pos2, vec2, Pos2, Rect};

/// Largest rectangle with the image's aspect ratio that fits inside
/// `avail`, centered within it.
pub fn fit_rect(avail: Rect, image_width: u32, image_height: u32) -> Rect {
    let img_aspect = image_width as f32 / image_height as f32;
    let avail_aspect = avail.width() / avail.height();

    let (display_width, display_height) = if img_aspect > avail_aspect {
        // Image is wider - fit to width
        let width = avail.width();
        (width, width / img_aspect)
    } else {
        // Image is taller - fit to height
        let height = avail.height();
        (height * img_aspect, height)
    };

    let x_offset = (avail.width() - display_width) / 2.0;
    let y_offset = (avail.height() - display_height) / 2.0;

    Rect::from_min_size(
        avail.min + vec2(x_offset, y_offset),
        vec2(display_width, display_height),
    )
}

/// On-screen pixels per source-image pixel for a fitted rectangle.
pub fn display_scale(image_rect: &Rect, image_width: u32) -> f32 {
    image_rect.width() / image_width as f32
}

/// Map a screen position to source-image pixel coordinates, clamped to
/// the image bounds.
pub fn screen_to_image(pos: Pos2, image_rect: &Rect, image_width: u32, image_height: u32) -> Point {
    let fx = (pos.x - image_rect.min.x) / image_rect.width();
    let fy = (pos.y - image_rect.min.y) / image_rect.height();
    Point::new(
        (fx * image_width as f32).clamp(0.0, image_width.saturating_sub(1) as f32),
        (fy * image_height as f32).clamp(0.0, image_height.saturating_sub(1) as f32),
    )
}

/// Map source-image pixel coordinates back to a screen position.
pub fn image_to_screen(point: &Point, image_rect: &Rect, image_width: u32, image_height: u32) -> Pos2 {
    pos2(
        image_rect.min.x + point.x / image_width as f32 * image_rect.width(),
        image_rect.min.y + point.y / image_height as f32 * image_rect.height(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_image_roundtrip() {
        // 400x300 image shown at 2x in a rect offset from the origin.
        let image_rect = Rect::from_min_size(pos2(100.0, 50.0), vec2(800.0, 600.0));

        let point = screen_to_image(pos2(500.0, 350.0), &image_rect, 400, 300);
        assert_eq!((point.x, point.y), (200.0, 150.0));

        let back = image_to_screen(&point, &image_rect, 400, 300);
        assert!((back.x - 500.0).abs() < 0.0001);
        assert!((back.y - 350.0).abs() < 0.0001);
    }

    #[test]
    fn test_screen_to_image_clamps_to_bounds() {
        let image_rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0));

        let before_origin = screen_to_image(pos2(-25.0, -25.0), &image_rect, 400, 300);
        assert_eq!((before_origin.x, before_origin.y), (0.0, 0.0));

        let past_corner = screen_to_image(pos2(1000.0, 1000.0), &image_rect, 400, 300);
        assert_eq!((past_corner.x, past_corner.y), (399.0, 299.0));
    }

    #[test]
    fn test_fit_rect_letterboxes_wide_image() {
        let avail = Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 400.0));
        let fitted = fit_rect(avail, 200, 100);

        assert_eq!(fitted.min, pos2(0.0, 100.0));
        assert_eq!(fitted.size(), vec2(400.0, 200.0));
    }

    #[test]
    fn test_fit_rect_pillarboxes_tall_image() {
        let avail = Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 400.0));
        let fitted = fit_rect(avail, 100, 200);

        assert_eq!(fitted.min, pos2(100.0, 0.0));
        assert_eq!(fitted.size(), vec2(200.0, 400.0));
    }

    #[test]
    fn test_display_scale() {
        let image_rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        assert_eq!(display_scale(&image_rect, 400), 2.0);
        assert_eq!(display_scale(&image_rect, 1600), 0.5);
    }
}
