// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask compositing.
//!
//! This module turns a session's stroke collection into the binary
//! inpainting mask: a grayscale raster the exact size of the source
//! image, unmarked everywhere except under the strokes, encoded as a
//! lossless PNG and wrapped in a data URI for transport.
//!
//! Strokes are rasterized directly onto the raster; there is no
//! intermediate color canvas. Every brush edge is hard, so the raster
//! holds exactly two values.

use crate::models::session::MaskSession;
use crate::models::stroke::{Point, Stroke};
use anyhow::{bail, Context, Result};
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder, Luma};

/// Mask value for pixels the user left alone (keep).
pub const MASK_UNMARKED: u8 = 0;
/// Mask value for pixels covered by a stroke (inpaint).
pub const MASK_MARKED: u8 = u8::MAX;

/// A composed, transport-ready mask.
#[derive(Debug, Clone)]
pub struct MaskArtifact {
    pub width: u32,
    pub height: u32,
    /// Lossless grayscale PNG encoding of the mask raster.
    pub png: Vec<u8>,
}

impl MaskArtifact {
    /// Wrap the PNG in a self-describing `data:` URI, consuming the
    /// artifact.
    pub fn into_data_uri(self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Rasterize the session's strokes onto an unmarked baseline.
///
/// The raster is allocated at the session's exact dimensions and fully
/// filled with [`MASK_UNMARKED`] before any stroke renders, so an empty
/// stroke collection yields a valid all-unmarked mask. Strokes render
/// in commit order, each with its own captured width and shade.
pub fn rasterize(session: &MaskSession) -> GrayImage {
    let mut mask = GrayImage::from_pixel(session.width, session.height, Luma([MASK_UNMARKED]));
    for stroke in session.strokes() {
        paint_stroke(&mut mask, stroke);
    }
    mask
}

/// Render one stroke as a chain of capsules along its polyline.
fn paint_stroke(mask: &mut GrayImage, stroke: &Stroke) {
    let radius = stroke.width / 2.0;
    let shade = Luma([stroke.luma]);

    match stroke.points.as_slice() {
        [] => {}
        // A tap without movement paints a single disc.
        [point] => fill_capsule(mask, *point, *point, radius, shade),
        points => {
            for pair in points.windows(2) {
                fill_capsule(mask, pair[0], pair[1], radius, shade);
            }
        }
    }
}

/// Mark every pixel within `radius` of the segment `a`..`b`. The edge
/// is hard: a pixel is either fully marked or untouched, which keeps
/// the mask strictly two-valued.
fn fill_capsule(mask: &mut GrayImage, a: Point, b: Point, radius: f32, shade: Luma<u8>) {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let radius_sq = radius * radius;

    // Scan only the segment's inflated bounding box, clipped to the raster.
    let min_x = (a.x.min(b.x) - radius).floor().max(0.0) as u32;
    let min_y = (a.y.min(b.y) - radius).floor().max(0.0) as u32;
    let max_x = ((a.x.max(b.x) + radius).ceil().max(0.0) as u32).min(width - 1);
    let max_y = ((a.y.max(b.y) + radius).ceil().max(0.0) as u32).min(height - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if dist_sq_to_segment(x as f32, y as f32, a, b) <= radius_sq {
                mask.put_pixel(x, y, shade);
            }
        }
    }
}

/// Squared distance from a pixel center to the closest point of the
/// segment `a`..`b`. A degenerate segment collapses to point distance.
fn dist_sq_to_segment(px: f32, py: f32, a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let cx = a.x + t * dx;
    let cy = a.y + t * dy;
    let ex = px - cx;
    let ey = py - cy;
    ex * ex + ey * ey
}

/// Encode a mask raster as a lossless grayscale PNG in memory.
pub fn encode_png(mask: &GrayImage) -> Result<Vec<u8>> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        bail!("cannot encode a {}x{} mask", width, height);
    }

    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(mask.as_raw(), width, height, ExtendedColorType::L8)
        .context("failed to encode mask PNG")?;
    Ok(buffer)
}

/// Run the full compositing pipeline for a session: rasterize the
/// committed strokes over the unmarked baseline and encode the result.
///
/// An empty stroke collection is a valid input producing an all-unmarked
/// mask. With a loaded image the dimensions are nonzero, so this only
/// fails if the encoder does.
pub fn compose(session: &MaskSession) -> Result<MaskArtifact> {
    let mask = rasterize(session);
    let png = encode_png(&mask)?;
    Ok(MaskArtifact {
        width: session.width,
        height: session.height,
        png,
    })
}
