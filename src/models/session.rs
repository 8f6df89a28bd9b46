// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask-authoring session state.
//!
//! One session corresponds to one loaded source image: the image's
//! identity, its pixel dimensions, and every stroke committed so far.

use super::stroke::Stroke;

/// Session state shared by the drawing surface and the mask compositor.
///
/// Dimensions are fixed at construction, after the source image has
/// decoded, and never change for the session's lifetime. The stroke
/// collection only grows: strokes are committed whole on pointer
/// release and there is no erase or edit operation.
#[derive(Debug, Clone)]
pub struct MaskSession {
    /// File name (not path) of the source image, passed through to the
    /// submission payload.
    pub image_filename: String,
    /// Source image width in pixels. The mask raster uses the same size.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
    strokes: Vec<Stroke>,
}

impl MaskSession {
    /// Create an empty session for a freshly loaded image.
    pub fn new(image_filename: String, width: u32, height: u32) -> Self {
        Self {
            image_filename,
            width,
            height,
            strokes: Vec::new(),
        }
    }

    /// Append a finished stroke. Committed strokes are immutable.
    pub fn commit_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// All committed strokes, in commit order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of committed strokes.
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stroke::Point;

    #[test]
    fn test_new_session_is_empty() {
        let session = MaskSession::new("photo.png".to_string(), 400, 300);
        assert_eq!(session.stroke_count(), 0);
        assert!(session.strokes().is_empty());
        assert_eq!((session.width, session.height), (400, 300));
    }

    #[test]
    fn test_commit_preserves_order() {
        let mut session = MaskSession::new("photo.png".to_string(), 400, 300);
        for x in [1.0_f32, 2.0, 3.0] {
            session.commit_stroke(Stroke::begin(Point::new(x, 0.0)));
        }
        let firsts: Vec<f32> = session.strokes().iter().map(|s| s.points[0].x).collect();
        assert_eq!(firsts, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_clone_is_a_stable_snapshot() {
        let mut session = MaskSession::new("photo.png".to_string(), 400, 300);
        session.commit_stroke(Stroke::begin(Point::new(1.0, 1.0)));

        let snapshot = session.clone();
        session.commit_stroke(Stroke::begin(Point::new(2.0, 2.0)));

        assert_eq!(snapshot.stroke_count(), 1);
        assert_eq!(session.stroke_count(), 2);
    }
}
